use std::str::FromStr;

use cropper_core::aspect::{AspectRatio, DEFAULT_CATALOG};
use cropper_core::geometry::Size;

// ---------------------------------------------------------------------------
// Rotation
// ---------------------------------------------------------------------------

#[test]
fn test_rotated_swaps_ratio() {
    let r = AspectRatio::Ratio { width: 9, height: 16 };
    assert_eq!(r.rotated(), AspectRatio::Ratio { width: 16, height: 9 });
}

#[test]
fn test_rotated_twice_is_identity() {
    for r in DEFAULT_CATALOG {
        assert_eq!(r.rotated().rotated(), r);
    }
}

#[test]
fn test_rotated_keeps_named_variants() {
    assert_eq!(AspectRatio::Original.rotated(), AspectRatio::Original);
    assert_eq!(AspectRatio::FreeForm.rotated(), AspectRatio::FreeForm);
    assert_eq!(AspectRatio::Square.rotated(), AspectRatio::Square);
}

// ---------------------------------------------------------------------------
// Tokens
// ---------------------------------------------------------------------------

#[test]
fn test_token_round_trip() {
    for token in ["ORIGINAL", "FREEFORM", "SQUARE", "3:2", "16:9"] {
        assert_eq!(AspectRatio::from_token(token).to_token(), token);
    }
}

#[test]
fn test_garbage_tokens_are_free_form() {
    for token in ["", "square", "4:", ":3", "a:b", "1:2:3", "-4:3", "0:5", "4x3"] {
        assert_eq!(AspectRatio::from_token(token), AspectRatio::FreeForm, "{token:?}");
    }
}

#[test]
fn test_from_str_never_fails() {
    assert_eq!(AspectRatio::from_str("nonsense"), Ok(AspectRatio::FreeForm));
    let parsed: AspectRatio = "5:7".parse().unwrap();
    assert_eq!(parsed, AspectRatio::Ratio { width: 5, height: 7 });
}

#[test]
fn test_serde_uses_token() {
    let r = AspectRatio::Ratio { width: 3, height: 4 };
    assert_eq!(serde_json::to_string(&r).unwrap(), "\"3:4\"");
    let back: AspectRatio = serde_json::from_str("\"ORIGINAL\"").unwrap();
    assert_eq!(back, AspectRatio::Original);
    let lenient: AspectRatio = serde_json::from_str("\"???\"").unwrap();
    assert_eq!(lenient, AspectRatio::FreeForm);
}

// ---------------------------------------------------------------------------
// Values
// ---------------------------------------------------------------------------

#[test]
fn test_values() {
    let image = Size::new(4000.0, 3000.0);
    assert_eq!(AspectRatio::FreeForm.value(image), None);
    assert_eq!(AspectRatio::Square.value(image), Some(1.0));
    assert_eq!(AspectRatio::Ratio { width: 2, height: 3 }.value(image), Some(2.0 / 3.0));
    let original = AspectRatio::Original.value(image).unwrap();
    assert!((original - 4.0 / 3.0).abs() < 1e-12);
    assert_eq!(AspectRatio::Original.value(Size::new(0.0, 0.0)), None);
}

#[test]
fn test_default_catalog() {
    assert_eq!(DEFAULT_CATALOG.len(), 9);
    assert_eq!(DEFAULT_CATALOG[0], AspectRatio::Original);
    assert_eq!(DEFAULT_CATALOG[8], AspectRatio::Ratio { width: 2, height: 3 });
    assert!(!AspectRatio::default().is_locked());
}
