use chrono::NaiveDate;
use proptest::prelude::*;

use inkdex::content::truncate_excerpt;
use inkdex::index::schema::DATE_WIRE_FORMAT;
use inkdex::test_utils::entry;
use inkdex::{Content, IndexableDocument, TenantId};

proptest! {
    #[test]
    fn test_date_survives_the_wire_format(
        year in 1i32..=9999,
        month in 1u32..=12,
        day in 1u32..=28,
    ) {
        let date = NaiveDate::from_ymd_opt(year, month, day).expect("in range");
        let wire = date.format(DATE_WIRE_FORMAT).to_string();
        prop_assert_eq!(wire.len(), 8);
        let back = NaiveDate::parse_from_str(&wire, DATE_WIRE_FORMAT).expect("parses");
        prop_assert_eq!(back, date);
    }

    #[test]
    fn test_built_documents_never_have_missing_text_fields(
        title in proptest::option::of(".*"),
        subtitle in proptest::option::of(".*"),
        author in proptest::option::of(".*"),
    ) {
        let mut item = entry("e1", "body text");
        item.title.clone_from(&title);
        item.subtitle.clone_from(&subtitle);
        item.author.clone_from(&author);

        let doc = IndexableDocument::build(&Content::Entry(item)).expect("published");
        prop_assert_eq!(doc.title, title.unwrap_or_default());
        prop_assert_eq!(doc.subtitle, subtitle.unwrap_or_default());
        prop_assert_eq!(doc.author, author.unwrap_or_default());
    }

    #[test]
    fn test_entries_index_only_while_published(published in any::<bool>()) {
        let mut item = entry("e1", "body text");
        item.published = published;
        let doc = IndexableDocument::build(&Content::Entry(item));
        prop_assert_eq!(doc.is_some(), published);
    }

    #[test]
    fn test_truncation_respects_the_character_budget(
        text in ".*",
        max in 3usize..300,
    ) {
        let cut = truncate_excerpt(&text, max);
        prop_assert!(cut.chars().count() <= max);
        if text.chars().count() <= max {
            prop_assert_eq!(cut, text);
        } else {
            prop_assert!(cut.ends_with("..."));
            let stem: String = text.chars().take(max - 3).collect();
            prop_assert!(cut.starts_with(&stem));
        }
    }

    #[test]
    fn test_wellformed_tenant_ids_are_accepted(
        id in "[a-zA-Z0-9][a-zA-Z0-9._-]{0,62}",
    ) {
        let tenant = TenantId::new(id.clone()).expect("valid id");
        prop_assert_eq!(tenant.as_str(), id);
    }

    #[test]
    fn test_path_separators_never_pass_tenant_validation(
        prefix in "[a-z]{1,8}",
        suffix in "[a-z]{1,8}",
        separator in prop::sample::select(vec!['/', '\\']),
    ) {
        let id = format!("{prefix}{separator}{suffix}");
        prop_assert!(TenantId::new(id).is_err());
    }
}
