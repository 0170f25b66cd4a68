use std::path::Path;

use clap::Parser;
use dr_page::{Element, Page, Selector};
use serde_json::Value;
use tempfile::TempDir;

use crate::commands::prefs::PrefsCommand;
use crate::commands::run::ActionArg;
use crate::{Cli, Commands};

async fn exec(args: &[&str]) -> String {
    let cli = Cli::try_parse_from(args.iter().copied()).unwrap();
    let mut out = Vec::new();
    cli.command.execute(&mut out).await.unwrap();
    String::from_utf8(out).unwrap()
}

fn write_page(dir: &Path, name: &str, tag_value: &str) -> String {
    let styled = |v: &str| Element::input().with_classes(&["sc-cqnWLZ", "hMxkNV"]).with_value(v).reactive();
    let page = Page::new(
        "https://www.pick2sell.kr/product/5?tab=basicInfo",
        vec![
            Element::new("div").with_classes(&["typo-text-md-medium"]).with_text("생활용품 > 수납"),
            Element::input()
                .with_attr("data-testid", "product-name-input")
                .with_value(name)
                .reactive(),
            styled(""),
            styled(""),
            styled(tag_value),
        ],
    );
    let path = dir.join("page.json");
    std::fs::write(&path, page.to_json_pretty().unwrap()).unwrap();
    path.to_string_lossy().into_owned()
}

// ========== Argument parsing ==========

#[test]
fn test_parse_dedup() {
    let cli = Cli::try_parse_from(["dupstrip", "-v", "dedup", "abc abc", "--json", "-n", "3"]).unwrap();
    assert_eq!(cli.verbose, 1);
    assert_eq!(cli.log_filter(), "debug");
    match cli.command {
        Commands::Dedup(args) => {
            assert_eq!(args.text.as_deref(), Some("abc abc"));
            assert_eq!(args.max_iterations, 3);
            assert!(args.json);
            assert!(!args.single_pass);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_parse_run_defaults() {
    let cli = Cli::try_parse_from(["dupstrip", "run", "--page", "p.json"]).unwrap();
    match cli.command {
        Commands::Run(args) => {
            assert_eq!(args.action, ActionArg::All);
            assert_eq!(args.adapter, "reactive");
            assert!(!args.write);
            assert!(args.delay_ms.is_none());
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_parse_prefs_file_after_subcommand() {
    let cli = Cli::try_parse_from(["dupstrip", "prefs", "set-delay", "50", "--file", "x.json"]).unwrap();
    match cli.command {
        Commands::Prefs(args) => {
            assert_eq!(args.file.as_deref(), Some(Path::new("x.json")));
            assert!(matches!(args.command, PrefsCommand::SetDelay { ref delay } if delay == "50"));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_parse_rejects_unknown_action() {
    assert!(Cli::try_parse_from(["dupstrip", "run", "--page", "p.json", "--action", "nope"]).is_err());
}

// ========== Commands ==========

#[tokio::test]
async fn test_dedup_and_tag_commands() {
    assert_eq!(exec(&["dupstrip", "dedup", "야외 야외고양이 야외고양이집"]).await, "야외 고양이 집\n");
    assert_eq!(
        exec(&["dupstrip", "tag", "--category", "생활용품 기타", "--value", "수건"]).await,
        "비브랜드 수건\n"
    );
}

#[tokio::test]
async fn test_prefs_lifecycle() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("prefs.json");
    let file = file.to_str().unwrap();

    assert_eq!(exec(&["dupstrip", "prefs", "install-defaults", "--file", file]).await, "installed\n");
    assert_eq!(exec(&["dupstrip", "prefs", "install-defaults", "--file", file]).await, "already configured\n");
    assert_eq!(exec(&["dupstrip", "prefs", "set-delay", "99999", "--file", file]).await, "3000\n");
    assert_eq!(exec(&["dupstrip", "prefs", "set-delay", "abc", "--file", file]).await, "100\n");
    assert_eq!(
        exec(&["dupstrip", "prefs", "add-url", "https://shop.test/*", "--file", file]).await,
        "2 patterns\n"
    );

    let shown: Value = serde_json::from_str(&exec(&["dupstrip", "prefs", "show", "--file", file]).await).unwrap();
    assert_eq!(shown["urlPatterns"][0], "https://www.pick2sell.kr/product/*");
    assert_eq!(shown["urlPatterns"][1], "https://shop.test/*");
    assert_eq!(shown["inputCSelector"], "input.sc-iafpwu.UboKk");
    assert_eq!(shown["completeDelayMs"], 100);

    assert_eq!(exec(&["dupstrip", "matches", "https://shop.test/a/b", "--file", file]).await, "https://shop.test/*\n");
    assert_eq!(exec(&["dupstrip", "matches", "https://other.test/", "--file", file]).await, "no match\n");
}

#[tokio::test]
async fn test_run_all_writes_snapshot() {
    let dir = TempDir::new().unwrap();
    let page = write_page(dir.path(), "야외 야외고양이집", "수납함");
    let prefs = dir.path().join("prefs.json");
    let prefs = prefs.to_str().unwrap();

    let out = exec(&["dupstrip", "run", "--page", &page, "--prefs", prefs, "--delay-ms", "0", "--write"]).await;
    let report: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(report["active"], true);
    assert_eq!(report["action"], "run_all");
    assert_eq!(report["dedup"]["output"], "야외 고양이집");
    assert_eq!(report["tagged"], "비브랜드 수납함");
    assert_eq!(report["notice"], "실행했습니다");

    let saved = Page::from_json(&std::fs::read_to_string(&page).unwrap()).unwrap();
    let name = saved
        .query_selector(&Selector::parse(r#"input[data-testid="product-name-input"]"#).unwrap())
        .unwrap();
    assert_eq!(saved.read(name).as_deref(), Some("야외 고양이집"));
}

#[tokio::test]
async fn test_run_inactive_url_leaves_page_alone() {
    let dir = TempDir::new().unwrap();
    let page = write_page(dir.path(), "abc abc", "v");
    let prefs = dir.path().join("prefs.json");
    let before = std::fs::read_to_string(&page).unwrap();

    let out = exec(&[
        "dupstrip",
        "run",
        "--page",
        &page,
        "--url",
        "https://elsewhere.test/",
        "--prefs",
        prefs.to_str().unwrap(),
        "--write",
    ])
    .await;
    let report: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(report["active"], false);
    assert_eq!(std::fs::read_to_string(&page).unwrap(), before);
}

#[tokio::test]
async fn test_run_unknown_adapter_fails() {
    let dir = TempDir::new().unwrap();
    let page = write_page(dir.path(), "abc", "v");
    let cli = Cli::try_parse_from(["dupstrip", "run", "--page", page.as_str(), "--adapter", "magic"]).unwrap();
    let mut out = Vec::new();
    let err = cli.command.execute(&mut out).await.unwrap_err();
    assert!(err.to_string().contains("unknown adapter"));
}
