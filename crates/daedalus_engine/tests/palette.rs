use daedalus_engine::{Color, DAEDALUS_PALETTE, EngineError, PALETTE_F32, PaletteIndex, channels_of, nearest_index};

#[test]
fn every_index_resolves_to_itself() {
    for index in PaletteIndex::all() {
        assert_eq!(nearest_index(index.color()), Some(index));
    }
}

#[test]
fn float_channels_round_to_rgb() {
    for (i, channels) in PALETTE_F32.iter().enumerate() {
        let (r, g, b) = DAEDALUS_PALETTE[i].rgb();
        assert_eq!((channels[0] * 255.0).round() as u8, r, "red of {i}");
        assert_eq!((channels[1] * 255.0).round() as u8, g, "green of {i}");
        assert_eq!((channels[2] * 255.0).round() as u8, b, "blue of {i}");
    }
}

#[test]
fn near_miss_is_not_a_match() {
    // one off from the background #1a1c2c
    assert_eq!(nearest_index(Color::new(0x1a, 0x1c, 0x2d)), None);
    assert_eq!(nearest_index(Color::new(0, 0, 0)), None);
}

#[test]
fn palette_table_hex_values() {
    let expected = [
        "#5d275d", "#b13e53", "#ef7d57", "#ffcd75", "#a7f070", "#38b764", "#257179", "#29366f", "#3b5dc9", "#41a6f6", "#73eff7", "#f4f4f4", "#94b0c2",
        "#566c86", "#333c57", "#1a1c2c",
    ];
    for (index, hex) in PaletteIndex::all().zip(expected) {
        let (_, color) = channels_of(index);
        assert_eq!(color.to_hex(), hex);
    }
    assert_eq!(PaletteIndex::BACKGROUND.color().to_hex(), "#1a1c2c");
}

#[test]
fn index_range() {
    assert_eq!(PaletteIndex::all().count(), 16);
    assert!(PaletteIndex::new(15).unwrap().is_background());
    assert!(PaletteIndex::new(16).is_none());
    assert!(matches!(PaletteIndex::try_from(20u8), Err(EngineError::InvalidPaletteIndex { index: 20 })));
    assert!(PaletteIndex::new(7).unwrap().is_literal_digit());
    assert!(!PaletteIndex::new(8).unwrap().is_literal_digit());
}
