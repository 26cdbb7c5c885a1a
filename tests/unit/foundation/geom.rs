use super::*;

#[test]
fn expand_grows_every_side() {
    let b = Bounds::new(10.0, 20.0, 30.0, 40.0).expand(1.0);
    assert_eq!(b, Bounds::new(9.0, 19.0, 32.0, 42.0));
}

#[test]
fn parse_translate() {
    let t = parse_transform("translate(5, 7)");
    assert_eq!(translation_of(t), (5.0, 7.0));

    let t = parse_transform("translate(5)");
    assert_eq!(translation_of(t), (5.0, 0.0));
}

#[test]
fn parse_matrix() {
    let t = parse_transform("matrix(1,0,0,1,12,34)");
    assert_eq!(translation_of(t), (12.0, 34.0));
}

#[test]
fn chained_transforms_apply_left_to_right() {
    // scale then translate: the translation is in scaled coordinates.
    let t = parse_transform("scale(2) translate(3, 4)");
    let p = t * kurbo::Point::new(0.0, 0.0);
    assert_eq!((p.x, p.y), (6.0, 8.0));
}

#[test]
fn unknown_functions_are_skipped() {
    let t = parse_transform("rotate(45) translate(1, 2)");
    assert_eq!(translation_of(t), (1.0, 2.0));
}

#[test]
fn garbage_parses_to_identity() {
    assert_eq!(parse_transform("nonsense"), Affine::IDENTITY);
    assert_eq!(parse_transform(""), Affine::IDENTITY);
}
