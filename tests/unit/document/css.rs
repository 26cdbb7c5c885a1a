use super::*;

#[test]
fn parse_style_trims_and_skips_malformed() {
    let style = parse_style("fill: #fff ; font-size:10pt; garbage ;;");
    assert_eq!(style.get("fill").map(String::as_str), Some("#fff"));
    assert_eq!(style.get("font-size").map(String::as_str), Some("10pt"));
    assert_eq!(style.len(), 2);
}

#[test]
fn format_style_round_trips() {
    let style = parse_style("a:1;b:2;");
    let formatted = format_style(&style);
    assert_eq!(parse_style(&formatted), style);
    assert!(formatted.ends_with(';'));
}

#[test]
fn size_to_em_units() {
    assert_eq!(size_to_em("18px"), Some(1.0));
    assert_eq!(size_to_em("9px"), Some(0.5));
    assert_eq!(size_to_em("150%"), Some(1.5));
    assert_eq!(size_to_em("2em"), Some(2.0));
    let pt = size_to_em("13.5pt").unwrap();
    assert!((pt - 1.0).abs() < 1e-9);
    assert_eq!(size_to_em("12vw"), None);
    assert_eq!(size_to_em(""), None);
}
