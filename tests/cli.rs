use clap::Parser;
use clap::error::ErrorKind;
use std::path::Path;

use pandaquery::cli::Args;

#[test]
fn query_words_and_options() {
    let args = Args::try_parse_from(["pandaquery", "--graph", "export.json", "panda", "gin"]).unwrap();
    assert_eq!(args.graph.as_deref(), Some(Path::new("export.json")));
    assert_eq!(args.config, None);
    assert_eq!(args.query().as_deref(), Some("panda gin"));

    let args = Args::try_parse_from(["pandaquery", "panda", "gin", "--config", "pandaquery.toml"]).unwrap();
    assert_eq!(args.config.as_deref(), Some(Path::new("pandaquery.toml")));
    assert_eq!(args.query().as_deref(), Some("panda gin"));
}

#[test]
fn no_words_reads_stdin() {
    let args = Args::try_parse_from(["pandaquery"]).unwrap();
    assert_eq!(args.query(), None);
}

#[test]
fn help_is_not_a_query() {
    let err = Args::try_parse_from(["pandaquery", "--help"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DisplayHelp);
}

#[test]
fn malformed_options_are_rejected() {
    // a trailing option without its value
    assert!(Args::try_parse_from(["pandaquery", "panda", "gin", "--graph"]).is_err());
    assert!(Args::try_parse_from(["pandaquery", "--nope", "gin"]).is_err());
}
