#[cfg(test)]
mod qr_proptests {

    use prop::string::string_regex;
    use proptest::prelude::*;

    use qrcraft::*;

    pub fn ec_level_strategy() -> BoxedStrategy<ECLevel> {
        prop_oneof![Just(ECLevel::L), Just(ECLevel::M), Just(ECLevel::Q), Just(ECLevel::H)].boxed()
    }

    pub fn qr_strategy(regex: &str, max_sz: usize) -> impl Strategy<Value = (ECLevel, String)> {
        let pattern = format!(r"{regex}{{0,{max_sz}}}");
        (ec_level_strategy(), string_regex(&pattern).unwrap())
    }

    fn decode(qr: &QR) -> (usize, String) {
        let light = image::Rgba([255, 255, 255, 255]);
        let dark = image::Rgba([0, 0, 0, 255]);
        let img = image::DynamicImage::ImageRgba8(qr.to_image(4, 4, light, dark)).to_luma8();
        let mut prepared = rqrr::PreparedImage::prepare(img);
        let grids = prepared.detect_grids();
        assert_eq!(grids.len(), 1);
        let (meta, content) = grids[0].decode().expect("Failed to read QR");
        (meta.version.0, content)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn proptest_numeric(params in qr_strategy("[0-9]", 300)) {
            let (ecl, data) = params;

            let qr = QRBuilder::new(&data).ec_level(ecl).build().unwrap();
            prop_assert_eq!(qr.mode(), Mode::Numeric);

            let (ver, decoded) = decode(&qr);
            prop_assert_eq!(ver, *qr.version());
            prop_assert_eq!(data, decoded);
        }

        #[test]
        fn proptest_alphanumeric(params in qr_strategy(r"[0-9A-Z $%*+\-./:]", 200)) {
            let (ecl, data) = params;
            let data = format!("{data}Z");

            let qr = QRBuilder::new(&data).ec_level(ecl).build().unwrap();
            prop_assert_eq!(qr.mode(), Mode::Alphanumeric);

            let (ver, decoded) = decode(&qr);
            prop_assert_eq!(ver, *qr.version());
            prop_assert_eq!(data, decoded);
        }

        #[test]
        fn proptest_byte(params in qr_strategy(r"[ -~]", 150)) {
            let (ecl, data) = params;
            let data = format!("{data}z");

            let qr = QRBuilder::new(&data).ec_level(ecl).build().unwrap();
            prop_assert_eq!(qr.mode(), Mode::Byte);

            let (ver, decoded) = decode(&qr);
            prop_assert_eq!(ver, *qr.version());
            prop_assert_eq!(data, decoded);
        }

        #[test]
        fn proptest_level_upgrade(params in qr_strategy(r"[ -~]", 500)) {
            let (ecl, data) = params;

            let qr = QRBuilder::new(&data).ec_level(ecl).build().unwrap();
            prop_assert!(qr.ec_level() >= ecl);
            prop_assert_eq!(qr.codewords().len(), qr.version().total_codewords());
        }

        #[test]
        fn proptest_capacity_monotonicity(ecl in ec_level_strategy(), len in 0usize..1200, extra in 1usize..300) {
            let short = "7".repeat(len);
            let long = "7".repeat(len + extra);

            let short_qr = QRBuilder::new(&short).ec_level(ecl).build().unwrap();
            let long_qr = QRBuilder::new(&long).ec_level(ecl).build().unwrap();
            prop_assert!(short_qr.version() <= long_qr.version());
        }

        #[test]
        fn proptest_mask_optimality(params in qr_strategy(r"[ -~]", 60)) {
            let (ecl, data) = params;

            let qr = QRBuilder::new(&data).ec_level(ecl).build().unwrap();
            let best = qr.matrix().penalty();
            for mask in MaskPattern::all() {
                let other = QR::from_parts(
                    qr.version(),
                    qr.ec_level(),
                    qr.mode(),
                    qr.codewords().to_vec(),
                    mask,
                )
                .unwrap();
                let penalty = other.matrix().penalty();
                if *mask < *qr.mask() {
                    prop_assert!(penalty > best);
                } else {
                    prop_assert!(penalty >= best);
                }
            }
        }

        #[test]
        fn proptest_determinism_and_round_trip(params in qr_strategy(r"[ -~]", 100)) {
            let (ecl, data) = params;

            let qr = QRBuilder::new(&data).ec_level(ecl).build().unwrap();
            let again = QRBuilder::new(&data).ec_level(ecl).build().unwrap();
            prop_assert_eq!(&qr, &again);

            let loaded = QR::from_json(&qr.to_json().unwrap()).unwrap();
            prop_assert_eq!(loaded.matrix(), qr.matrix());
        }
    }
}

#[cfg(test)]
mod qr_tests {
    use test_case::test_case;

    use qrcraft::{ECLevel, Mode, QRBuilder, QRError, RenderOptions, QR};

    fn decode(qr: &QR) -> (usize, String) {
        let opts = RenderOptions::default();
        let img = image::DynamicImage::ImageRgba8(qr.to_image(4, 4, opts.light, opts.dark));
        let mut prepared = rqrr::PreparedImage::prepare(img.to_luma8());
        let grids = prepared.detect_grids();
        assert_eq!(grids.len(), 1);
        let (meta, content) = grids[0].decode().expect("Failed to read QR");
        (meta.version.0, content)
    }

    #[test_case("Hello, world!".to_string(), ECLevel::L, 1; "test_qr_1")]
    #[test_case("TEST".to_string(), ECLevel::M, 1; "test_qr_2")]
    #[test_case("12345".to_string(), ECLevel::Q, 1; "test_qr_3")]
    #[test_case("OK".to_string(), ECLevel::H, 1; "test_qr_4")]
    #[test_case("B3@j#Z%8vK!3zC^8&rF9*b6".repeat(5), ECLevel::L, 6; "test_qr_5")]
    #[test_case("A11111111111111".repeat(11), ECLevel::M, 7; "test_qr_6")]
    #[test_case("aAAAAAA1111111111111AAAAAAa".repeat(3), ECLevel::Q, 7; "test_qr_7")]
    #[test_case("1234567890".repeat(15), ECLevel::H, 7; "test_qr_8")]
    #[test_case("A11111111111111".repeat(20), ECLevel::M, 10; "test_qr_9")]
    #[test_case("1234567890".repeat(28), ECLevel::H, 10; "test_qr_10")]
    #[test_case("The quick brown fox jumps over the lazy dog. ".repeat(12), ECLevel::M, 18; "test_qr_11")]
    fn test_qr(data: String, ecl: ECLevel, exp_ver: usize) {
        let qr = QRBuilder::new(&data).ec_level(ecl).build().unwrap();
        assert_eq!(*qr.version(), exp_ver);
        assert!(qr.ec_level() >= ecl);

        let (ver, decoded) = decode(&qr);
        assert_eq!(ver, exp_ver);
        assert_eq!(decoded, data);
    }

    #[test]
    fn test_scenario_hello_world() {
        let qr = QRBuilder::new("HELLO WORLD").ec_level(ECLevel::Q).build().unwrap();
        assert_eq!(qr.mode(), Mode::Alphanumeric);
        assert_eq!(*qr.version(), 1);
        assert_eq!(qr.ec_level(), ECLevel::Q);
        assert_eq!(qr.width(), 21);
        assert_eq!(decode(&qr), (1, "HELLO WORLD".to_string()));
    }

    #[test]
    fn test_scenario_empty_content() {
        let qr = QRBuilder::new("").build().unwrap();
        assert_eq!(qr.mode(), Mode::Numeric);
        assert_eq!(*qr.version(), 1);
        assert_eq!(qr.ec_level(), ECLevel::H);
        assert_eq!(&qr.codewords()[..3], b"\x10\x00\x00");
        assert!(qr.codewords()[3..9].chunks(2).all(|c| c == b"\xec\x11"));
    }

    #[test]
    fn test_scenario_content_too_large() {
        let data = "a".repeat(3000);
        let res = QRBuilder::new(&data).ec_level(ECLevel::L).build();
        assert_eq!(res.unwrap_err(), QRError::ContentTooLarge);
    }

    #[test]
    fn test_scenario_raster_size() {
        let qr = QRBuilder::new("01234567").build().unwrap();
        let opts = RenderOptions::default();
        let img = qr.to_image(8, 2, opts.light, opts.dark);
        assert_eq!(img.width(), 200);

        let bytes = qr.to_png(&RenderOptions { width: 200, ..opts }).unwrap();
        let img = image::load_from_memory(&bytes).unwrap();
        assert_eq!(img.width(), 200);
    }

    #[test]
    fn test_kanji() {
        let qr = QRBuilder::new("こんにちは世界").build().unwrap();
        assert_eq!(qr.mode(), Mode::Kanji);
        assert_eq!(*qr.version(), 1);
        // 4 + 8 + 7 * 13 = 103 bits
        assert_eq!(qr.codewords()[0] >> 4, 0b1000);
        assert_eq!(qr.codewords()[0] & 0x0F, 0);
        assert_eq!(qr.codewords()[1] >> 4, 7);
    }

    #[test]
    fn test_json_round_trip() {
        let qr = QRBuilder::new("https://example.com/?q=1").ec_level(ECLevel::H).build().unwrap();
        let json = qr.to_json().unwrap();
        let loaded = QR::from_json(&json).unwrap();
        assert_eq!(loaded, qr);
        assert_eq!(decode(&loaded).1, "https://example.com/?q=1");
    }

    #[test]
    fn test_invalid_input_type() {
        let res = QRBuilder::from_utf8(b"\xc3\x28");
        assert_eq!(res.err(), Some(QRError::InvalidInputType));
    }
}
