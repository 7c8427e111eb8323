use super::*;

// -----------------------------------------------------------------------
// generate_slug
// -----------------------------------------------------------------------

#[test]
fn slug_collapses_whitespace_and_strips_punctuation() {
    assert_eq!(generate_slug("Ceramic  Coating!!"), "ceramic-coating");
}

#[test]
fn slug_trims_and_collapses_hyphens() {
    assert_eq!(generate_slug("--Already--Slugged--"), "already-slugged");
}

#[test]
fn slug_does_not_insert_hyphen_for_stripped_chars() {
    assert_eq!(generate_slug("Uncle Arnie's"), "uncle-arnies");
    assert_eq!(generate_slug("a!b"), "ab");
}

#[test]
fn slug_keeps_underscores_and_digits() {
    assert_eq!(generate_slug("Type_2 Sealant 500"), "type_2-sealant-500");
}

#[test]
fn slug_mixed_separators_become_one_hyphen() {
    assert_eq!(generate_slug("High - Temperature\tPaint"), "high-temperature-paint");
}

#[test]
fn slug_drops_non_ascii_letters() {
    assert_eq!(generate_slug("Señorita Drinks"), "seorita-drinks");
}

#[test]
fn slug_of_only_symbols_is_empty() {
    assert_eq!(generate_slug("!!! ???"), "");
}

#[test]
fn slug_is_deterministic_for_same_tag_name() {
    assert_eq!(
        generate_slug("High Temperature"),
        generate_slug("high   temperature")
    );
}

// -----------------------------------------------------------------------
// clean_text
// -----------------------------------------------------------------------

#[test]
fn clean_text_decodes_entities() {
    assert_eq!(
        clean_text("Fish&nbsp;&amp;&nbsp;Chips &lt;b&gt; &quot;hot&quot; &#39;n&#39;"),
        "Fish & Chips <b> \"hot\" 'n'"
    );
}

#[test]
fn clean_text_collapses_whitespace_and_trims() {
    assert_eq!(clean_text("  line one\n\n\tline   two  "), "line one line two");
}

#[test]
fn clean_text_leaves_unknown_entities() {
    assert_eq!(clean_text("R&D &copy; 2024"), "R&D &copy; 2024");
}

#[test]
fn clean_text_decodes_in_a_single_pass() {
    assert_eq!(clean_text("&amp;lt;"), "&lt;");
}

// -----------------------------------------------------------------------
// truncate_text
// -----------------------------------------------------------------------

#[test]
fn truncate_long_text_to_exact_length() {
    let text = "a".repeat(200);
    let truncated = truncate_text(&text, DEFAULT_TRUNCATE_LEN);
    assert_eq!(truncated.chars().count(), 160);
    assert!(truncated.ends_with("..."));
}

#[test]
fn truncate_leaves_short_text_alone() {
    assert_eq!(truncate_text("short", 160), "short");
    let exact = "b".repeat(160);
    assert_eq!(truncate_text(&exact, 160), exact);
}

#[test]
fn truncate_counts_characters_not_bytes() {
    let text = "é".repeat(20);
    let truncated = truncate_text(&text, 10);
    assert_eq!(truncated, format!("{}...", "é".repeat(7)));
}

// -----------------------------------------------------------------------
// parse_specifications
// -----------------------------------------------------------------------

fn row(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|c| (*c).to_string()).collect()
}

#[test]
fn specifications_parse_key_value_unit() {
    let specs = parse_specifications(&[
        row(&["Max&nbsp;temp", " 1200 ", "°C"]),
        row(&["Finish", "Matte"]),
    ]);
    assert_eq!(
        specs,
        vec![
            ScrapedSpecification {
                key: "Max temp".to_string(),
                value: "1200".to_string(),
                unit: Some("°C".to_string()),
            },
            ScrapedSpecification {
                key: "Finish".to_string(),
                value: "Matte".to_string(),
                unit: None,
            },
        ]
    );
}

#[test]
fn specifications_skip_short_and_empty_rows() {
    let specs = parse_specifications(&[
        row(&["Lonely"]),
        row(&["", "value"]),
        row(&["key", "   "]),
        row(&["Coverage", "12", "  "]),
    ]);
    assert_eq!(specs.len(), 1);
    assert_eq!(specs[0].key, "Coverage");
    assert!(specs[0].unit.is_none());
}

// -----------------------------------------------------------------------
// extract_tags_from_text
// -----------------------------------------------------------------------

#[test]
fn tags_are_trimmed_lowercased_and_filtered() {
    let long = "x".repeat(51);
    let text = format!(" High Temperature ,, Rust Proof,{long}");
    assert_eq!(
        extract_tags_from_text(&text, ","),
        vec!["high temperature".to_string(), "rust proof".to_string()]
    );
}

#[test]
fn tags_keep_entries_of_exactly_max_len() {
    let tag = "y".repeat(MAX_TAG_LEN);
    assert_eq!(extract_tags_from_text(&tag, ","), vec![tag]);
}

#[test]
fn tags_are_capped() {
    let text = (0..80).map(|i| format!("tag{i}")).collect::<Vec<_>>().join(";");
    let tags = extract_tags_from_text(&text, ";");
    assert_eq!(tags.len(), MAX_TAGS);
    assert_eq!(tags[0], "tag0");
}
