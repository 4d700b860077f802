//! Integration tests for csv-guess

use csv_guess::{
    ColumnConfig, ConfigDiff, CsvAllStringsGuessPlugin, CsvGuessPlugin, CsvGuesser, DatePreference,
    Escape, GuessMode, GuessPipeline, GuessPolicy, ParserConfig, Quote, Sample, SampleSize,
    SkipReason,
};
use std::io::Cursor;
use std::io::Write;
use tempfile::NamedTempFile;

fn guess_diff(text: &str) -> ConfigDiff {
    guess_diff_with_seed(text, &ParserConfig::default())
}

fn guess_diff_with_seed(text: &str, seed: &ParserConfig) -> ConfigDiff {
    CsvGuesser::new()
        .guess_diff(&Sample::from_text(text), seed)
        .unwrap()
}

fn column_types(diff: &ConfigDiff) -> Vec<String> {
    columns(diff).iter().map(|c| c.column_type.clone()).collect()
}

fn column_names(diff: &ConfigDiff) -> Vec<String> {
    columns(diff).iter().map(|c| c.name.clone()).collect()
}

fn columns(diff: &ConfigDiff) -> &[ColumnConfig] {
    diff.parser.columns.as_deref().unwrap()
}

#[test]
fn test_guess_simple() {
    let data = "id,account,time,purchase,comment\n\
                1,32864,2015-01-27 19:23:49,20150127,loader\n\
                2,14824,2015-01-27 19:01:23,20150127,loader plugin\n\
                3,27559,2015-01-28 02:20:02,20150128,\"Loader \"\"csv\"\" parser\"\n\
                4,11270,2015-01-29 11:54:36,20150129,NULL\n";
    let diff = guess_diff(data);
    let parser = &diff.parser;

    assert_eq!(parser.kind.as_deref(), Some("csv"));
    assert_eq!(parser.delimiter, Some(','));
    assert_eq!(parser.quote, Some(Quote::Some('"')));
    assert_eq!(parser.escape, Some(Escape::Doubled));
    assert_eq!(parser.null_string.as_deref(), Some("NULL"));
    assert_eq!(parser.trim_if_needed, None);
    assert_eq!(parser.skip_header_lines, Some(1));
    assert_eq!(parser.allow_extra_columns, Some(false));
    assert_eq!(parser.allow_optional_columns, Some(false));

    assert_eq!(
        column_names(&diff),
        vec!["id", "account", "time", "purchase", "comment"]
    );
    assert_eq!(
        column_types(&diff),
        vec!["long", "long", "timestamp", "long", "string"]
    );
    assert_eq!(columns(&diff)[2].format.as_deref(), Some("%Y-%m-%d %H:%M:%S"));
}

#[test]
fn test_header_contrast() {
    let diff = guess_diff("name,age\nalice,30\n");
    assert_eq!(column_names(&diff), vec!["name", "age"]);
    assert_eq!(column_types(&diff), vec!["string", "long"]);
    assert_eq!(diff.parser.skip_header_lines, Some(1));
}

#[test]
fn test_numeric_rows_have_no_header() {
    let diff = guess_diff("1,2\n3,4\n");
    assert_eq!(column_names(&diff), vec!["c0", "c1"]);
    assert_eq!(column_types(&diff), vec!["long", "long"]);
    assert_eq!(diff.parser.skip_header_lines, None);
}

#[test]
fn test_tab_delimiter() {
    let diff = guess_diff("a\tb\tc\n1\t2\t3\n");
    assert_eq!(diff.parser.delimiter, Some('\t'));
    assert_eq!(column_names(&diff), vec!["a", "b", "c"]);
}

#[test]
fn test_semicolon_delimiter() {
    // decimal commas must not win over the semicolon
    let data = "name;qty;price\napple;3;1,5\npear;10;2,25\n";
    let diff = guess_diff(data);
    assert_eq!(diff.parser.delimiter, Some(';'));
    assert_eq!(column_names(&diff), vec!["name", "qty", "price"]);
    assert_eq!(column_types(&diff), vec!["string", "long", "string"]);
}

#[test]
fn test_pipe_delimiter() {
    let diff = guess_diff("name|age|city\nAlice|30|New York\nBob|25|Los Angeles\n");
    assert_eq!(diff.parser.delimiter, Some('|'));
}

#[test]
fn test_single_quote() {
    let diff = guess_diff("'a','b'\n'1','2'\n");
    assert_eq!(diff.parser.delimiter, Some(','));
    assert_eq!(diff.parser.quote, Some(Quote::Some('\'')));
}

#[test]
fn test_backslash_escape() {
    let data = "id,comment\n1,\"say \\\"hi\\\"\"\n2,\"a\\, b\"\n";
    let diff = guess_diff(data);
    assert_eq!(diff.parser.quote, Some(Quote::Some('"')));
    assert_eq!(diff.parser.escape, Some(Escape::Backslash));
    assert_eq!(column_types(&diff), vec!["long", "string"]);
}

#[test]
fn test_merge_time_formats() {
    let diff = guess_diff("id,time\n1,2017-01-01 00:00:00\n2,2017-01-02T00:00:00\n");
    let time = &columns(&diff)[1];

    assert_eq!(time.column_type, "timestamp");
    assert_eq!(time.format.as_deref(), Some("%Y-%m-%dT%H:%M:%S"));
    assert_eq!(time.alternate_formats, vec!["%Y-%m-%d %H:%M:%S"]);
}

#[test]
fn test_1_row() {
    let diff = guess_diff("1,foo\n");
    assert_eq!(column_names(&diff), vec!["c0", "c1"]);
    assert_eq!(column_types(&diff), vec!["long", "string"]);
    assert_eq!(diff.parser.trim_if_needed, None);
}

#[test]
fn test_1_row_with_trim_needed() {
    let diff = guess_diff(" 1 , foo \n");
    assert_eq!(diff.parser.trim_if_needed, Some(true));
    assert_eq!(column_types(&diff), vec!["long", "string"]);
}

#[test]
fn test_2_rows_with_trim_needed() {
    let diff = guess_diff("id , name\n 1 , foo\n 2 , bar\n");
    assert_eq!(diff.parser.trim_if_needed, Some(true));
    assert_eq!(column_names(&diff), vec!["id", "name"]);
    assert_eq!(column_types(&diff), vec!["long", "string"]);
}

#[test]
fn test_2_string_rows_have_no_header() {
    let diff = guess_diff("foo,bar\nbaz,qux\n");
    assert_eq!(column_names(&diff), vec!["c0", "c1"]);
    assert_eq!(column_types(&diff), vec!["string", "string"]);
}

#[test]
fn test_skip_suggest_if_empty_sample() {
    assert!(guess_diff("").is_empty());
    assert!(guess_diff("\n  \n\n").is_empty());
}

#[test]
fn test_single_column_declines() {
    let result = CsvGuesser::new()
        .guess(&Sample::from_text("1\n2\n3\n"), &ParserConfig::default())
        .unwrap();
    assert_eq!(result.skip_reason(), Some(SkipReason::NoConsistentDialect));
    assert_eq!(
        serde_json::to_string(&result.to_config_diff(&ParserConfig::default())).unwrap(),
        "{}"
    );
}

#[test]
fn test_single_column_with_seeded_delimiter() {
    let seed = ParserConfig {
        delimiter: Some(','),
        ..Default::default()
    };
    let diff = guess_diff_with_seed("id\n1\n2\n", &seed);

    assert_eq!(diff.parser.delimiter, None);
    assert_eq!(column_names(&diff), vec!["id"]);
    assert_eq!(column_types(&diff), vec!["long"]);
}

#[test]
fn test_seed_fields_win() {
    let seed = ParserConfig::from_json(r#"{"type": "csv", "delimiter": ";", "trim_if_needed": false}"#)
        .unwrap();
    let diff = guess_diff_with_seed("a;b\n 1; 2\n 3; 4\n", &seed);

    assert_eq!(diff.parser.kind, None);
    assert_eq!(diff.parser.delimiter, None);
    assert_eq!(diff.parser.trim_if_needed, None);

    let merged = diff.apply_to(&seed);
    assert_eq!(merged.delimiter, Some(';'));
    assert_eq!(merged.trim_if_needed, Some(false));
    // untrimmed values stay strings
    assert_eq!(column_types(&diff), vec!["string", "string"]);
}

#[test]
fn test_foreign_seed_is_left_alone() {
    let seed = ParserConfig::from_json(r#"{"type": "json"}"#).unwrap();
    let diff = guess_diff_with_seed("a,b\n1,2\n", &seed);
    assert!(diff.is_empty());
    assert_eq!(diff.apply_to(&seed), seed);
}

#[test]
fn test_invalid_seed_is_an_error() {
    let seed = ParserConfig::from_json(r#"{"delimiter": ",", "quote": ","}"#).unwrap();
    let result = CsvGuesser::new().guess(&Sample::from_text("a,b\n"), &seed);
    assert!(result.is_err());
}

#[test]
fn test_deterministic() {
    let data = "name;age,x\n\"a;b\",1,2\nc;d,3\n'e',f;4\n";
    let first = guess_diff(data);
    for _ in 0..5 {
        assert_eq!(guess_diff(data), first);
    }
}

#[test]
fn test_all_strings_keeps_dialect_and_header() {
    let data = "id,name,at\n1,foo,2017-01-01\n2,bar,2017-01-02\n";
    let typed = guess_diff(data);

    let mut guesser = CsvGuesser::new();
    guesser.mode(GuessMode::AllStrings);
    let strings = guesser
        .guess_diff(&Sample::from_text(data), &ParserConfig::default())
        .unwrap();

    assert_eq!(strings.parser.delimiter, typed.parser.delimiter);
    assert_eq!(strings.parser.skip_header_lines, typed.parser.skip_header_lines);
    assert_eq!(column_names(&strings), column_names(&typed));
    assert_eq!(column_types(&strings), vec!["string", "string", "string"]);
    assert_eq!(column_types(&typed), vec!["long", "string", "timestamp"]);
}

#[test]
fn test_pipeline_excludes_by_name() {
    let mut pipeline = GuessPipeline::default();
    pipeline
        .push(CsvGuessPlugin::default())
        .push(CsvAllStringsGuessPlugin::default())
        .exclude("csv");

    let diff = pipeline
        .run(&Sample::from_text("a,b\n1,2\n"), &ParserConfig::default())
        .unwrap();
    assert_eq!(column_types(&diff), vec!["string", "string"]);
}

#[test]
fn test_preamble_and_comments() {
    let data = "# exported from tool\nReport for January\nid,amount\n1,2.5\n# subtotal\n2,3.75\n";
    let diff = guess_diff(data);

    assert_eq!(diff.parser.comment_line_marker.as_deref(), Some("#"));
    assert_eq!(diff.parser.skip_header_lines, Some(3));
    assert_eq!(column_names(&diff), vec!["id", "amount"]);
    assert_eq!(column_types(&diff), vec!["long", "double"]);
}

#[test]
fn test_day_first_dates() {
    let data = "day,value\n01/02/2017,1\n03/04/2017,2\n";

    let mdy = guess_diff(data);
    assert_eq!(columns(&mdy)[0].format.as_deref(), Some("%m/%d/%Y"));

    let mut guesser = CsvGuesser::new();
    guesser.date_preference(DatePreference::DmyFormat);
    let dmy = guesser
        .guess_diff(&Sample::from_text(data), &ParserConfig::default())
        .unwrap();
    assert_eq!(columns(&dmy)[0].format.as_deref(), Some("%d/%m/%Y"));
}

#[test]
fn test_custom_policy() {
    let policy = GuessPolicy::from_json(r#"{"delimiters": [":", ","]}"#).unwrap();
    let mut guesser = CsvGuesser::new();
    guesser.policy(policy);

    let diff = guesser
        .guess_diff(&Sample::from_text("a:b\n1:2\n"), &ParserConfig::default())
        .unwrap();
    assert_eq!(diff.parser.delimiter, Some(':'));
}

#[test]
fn test_guess_reader_respects_sample_size() {
    let data = b"id,name\n1,foo\n2,bar\n3,baz\nnot,a,number,row\n";
    let mut guesser = CsvGuesser::new();
    guesser.sample_size(SampleSize::new(4, 1024));

    let result = guesser
        .guess_reader(Cursor::new(&data[..]), &ParserConfig::default())
        .unwrap();
    let guess = result.guess().unwrap();
    assert_eq!(guess.columns.len(), 2);
}

#[test]
fn test_guess_path() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "name,score,active").unwrap();
    writeln!(file, "alice,9.5,true").unwrap();
    writeln!(file, "bob,7,false").unwrap();
    file.flush().unwrap();

    let result = CsvGuesser::new()
        .guess_path(file.path(), &ParserConfig::default())
        .unwrap();
    let diff = result.to_config_diff(&ParserConfig::default());

    assert_eq!(column_names(&diff), vec!["name", "score", "active"]);
    assert_eq!(column_types(&diff), vec!["string", "double", "boolean"]);
}

#[test]
fn test_latin1_file() {
    let mut file = NamedTempFile::new().unwrap();
    // "café" in Windows-1252
    file.write_all(b"name,n\ncaf\xe9,1\nth\xe9,2\n").unwrap();
    file.flush().unwrap();

    let result = CsvGuesser::new()
        .guess_path(file.path(), &ParserConfig::default())
        .unwrap();
    let guess = result.guess().unwrap();
    assert_eq!(guess.dialect.delimiter, ',');
    assert_eq!(guess.columns[1].name, "n");
}

#[test]
fn test_diff_json_shape() {
    let diff = guess_diff("a,b\n1,x\n");
    let json: serde_json::Value = serde_json::from_str(&diff.to_json_pretty().unwrap()).unwrap();

    assert_eq!(json["parser"]["type"], "csv");
    assert_eq!(json["parser"]["delimiter"], ",");
    assert_eq!(json["parser"]["escape"], "none");
    assert_eq!(json["parser"]["columns"][0]["name"], "a");
    assert!(json["parser"].get("null_string").is_none());
}

#[test]
fn test_windows_paths_are_not_escapes() {
    let diff = guess_diff("path,n\nC:\\data\\file.txt,1\nD:\\tmp,2\n");
    assert_eq!(diff.parser.quote, Some(Quote::None));
    assert_eq!(diff.parser.escape, Some(Escape::None));
    assert_eq!(column_types(&diff), vec!["string", "long"]);
}

#[test]
fn test_seeded_header_with_no_data_rows() {
    let seed = ParserConfig::from_json(r#"{"header_line": true}"#).unwrap();
    let diff = guess_diff_with_seed("name,age\n", &seed);

    assert_eq!(column_names(&diff), vec!["name", "age"]);
    assert_eq!(column_types(&diff), vec!["string", "string"]);
    assert_eq!(diff.parser.skip_header_lines, Some(1));
}
