use proptest::prelude::*;
use staffdb::errors::ValidationError;
use staffdb::{Gender, validate};

proptest! {
    #[test]
    fn prop_three_alpha_words_accepted(
        words in prop::collection::vec("[a-zA-Z]{1,12}", 3),
        y in 1900i32..2025, m in 1u32..=12, d in 1u32..=28,
        male in any::<bool>(),
    ) {
        let name = words.join(" ");
        let date = format!("{y:04}-{m:02}-{d:02}");
        let gender = if male { "mAlE" } else { "female" };
        let r = validate(Some(&name), Some(&date), Some(gender)).unwrap();
        let tokens: Vec<_> = r.full_name().tokens().collect();
        prop_assert_eq!(tokens.len(), 3);
        for (t, w) in tokens.iter().zip(&words) {
            prop_assert!(t.eq_ignore_ascii_case(w));
            prop_assert!(t.chars().next().unwrap().is_ascii_uppercase());
        }
        prop_assert_eq!(r.gender(), if male { Gender::Male } else { Gender::Female });
    }

    #[test]
    fn prop_wrong_word_count_rejected(words in prop::collection::vec("[a-zA-Z]{1,8}", 0..8)) {
        prop_assume!(words.len() != 3);
        let res = validate(Some(&words.join(" ")), Some("2000-01-01"), Some("Male"));
        let expected = if words.is_empty() {
            ValidationError::MissingField { field: "full_name" }
        } else {
            ValidationError::BadNameFormat { tokens: words.len() }
        };
        prop_assert_eq!(res, Err(expected));
    }

    #[test]
    fn prop_arbitrary_input_never_panics(a in ".*", b in ".*", c in ".*") {
        if let Ok(r) = validate(Some(&a), Some(&b), Some(&c)) {
            prop_assert!(r.full_name().as_str().chars().all(|ch| ch == ' ' || ch.is_ascii_alphabetic()));
        }
    }
}
