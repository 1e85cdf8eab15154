//! Sample datasets shared by integration tests.

/// Three short news items, no labels yet.
pub const NEWS_CSV: &str = "\
id,title,text,label
1,Moon landing,Astronauts walked on the moon today.,
2,Cat elected,A cat was elected mayor of a small town in Alaska.,
3,Rain,It rained.,
";

/// Source with a label column already filled, for `--select-label` runs.
pub const LABELED_CSV: &str = "\
id,title,text,label
1,Moon landing,Astronauts walked on the moon today.,real
2,Cat elected,A cat was elected mayor of a small town in Alaska.,fake
3,Rain,It rained.,real
";

/// Config for `NEWS_CSV` written as `data.csv`, output in `out/markup.csv`.
pub fn news_config() -> String {
    r#"unmarked = "data.csv"
marked = "out/markup.csv"
id_col = "id"
text_col = "text"
label_col = "label"
show_cols = ["title"]
show_chars = 20

[labels]
"0" = "fake"
"1" = "real"

[meta.extra]
annotator = "tester"
"#
    .to_string()
}
