// Centralized integration suite for the data catalog; exercises the filter
// contract against the bundled records, catalog loading from disk, and both
// binaries end to end.
mod support;

use anyhow::{Context, Result};
use data_catalog::{
    ALL, CatalogIndex, CatalogSource, FilterEvent, FilterField, FilterOptions, FilterState,
    RecordId, Selection, Session, SessionView, apply_filter, load_catalog_from_path, transition,
};
use serde_json::Value;
use std::collections::BTreeSet;
use std::sync::Arc;
use support::{
    helper_command, record_json, run_command, run_with_stdin, stdout_text, write_catalog,
};
use tempfile::TempDir;

fn bundled() -> CatalogIndex {
    CatalogIndex::bundled().expect("bundled catalog")
}

fn visible_ids(index: &CatalogIndex, state: &FilterState) -> Vec<i64> {
    apply_filter(index.records(), state)
        .ids()
        .into_iter()
        .map(|id| id.0)
        .collect()
}

// A spread of filter states covering each control alone and in combination.
fn sample_states(options: &FilterOptions) -> Vec<FilterState> {
    let mut states = vec![FilterState::default()];
    for search in ["", "CRM", "аналитик", "ДАННЫХ", "zzz-no-match", " "] {
        for field in FilterField::EVERY {
            for option in options.for_field(field) {
                let mut state = FilterState {
                    search: search.to_string(),
                    ..Default::default()
                };
                *state.selection_mut(field) = Selection::parse(option);
                states.push(state);
            }
        }
    }
    states.push(FilterState {
        search: "а".into(),
        category: Selection::parse("Маркетинг"),
        kind: Selection::parse("Аналитика"),
        status: Selection::parse("Актуальный"),
    });
    states
}

#[test]
fn default_state_yields_all_six_records() {
    let index = bundled();
    assert_eq!(
        visible_ids(&index, &FilterState::default()),
        vec![1, 2, 3, 4, 5, 6]
    );
}

#[test]
fn literal_scenarios() {
    let index = bundled();

    let crm = FilterState {
        search: "CRM".into(),
        ..Default::default()
    };
    assert_eq!(visible_ids(&index, &crm), vec![2]);

    let finance = FilterState {
        category: Selection::parse("Финансы"),
        ..Default::default()
    };
    assert_eq!(visible_ids(&index, &finance), vec![1]);

    let archived = FilterState {
        status: Selection::parse("Архивный"),
        ..Default::default()
    };
    assert_eq!(visible_ids(&index, &archived), vec![4]);

    let nothing = FilterState {
        search: "zzz-no-match".into(),
        ..Default::default()
    };
    let outcome = apply_filter(index.records(), &nothing);
    assert!(outcome.is_no_results());
    assert_eq!(outcome.count(), 0);

    let product_hr = FilterState {
        search: "HR".into(),
        category: Selection::parse("Продукт"),
        ..Default::default()
    };
    assert!(apply_filter(index.records(), &product_hr).is_no_results());
}

#[test]
fn output_is_ordered_subset_and_idempotent() {
    let index = bundled();
    let options = FilterOptions::derive(index.records());
    let all: Vec<i64> = index.records().iter().map(|r| r.id.0).collect();
    for state in sample_states(&options) {
        let first = visible_ids(&index, &state);
        let mut cursor = all.iter();
        for id in &first {
            assert!(
                cursor.any(|candidate| candidate == id),
                "{first:?} is not an ordered subsequence for {state:?}"
            );
        }
        assert_eq!(first, visible_ids(&index, &state), "not idempotent: {state:?}");
        let outcome = apply_filter(index.records(), &state);
        assert_eq!(outcome.count(), first.len());
        assert_eq!(outcome.is_no_results(), first.is_empty());
    }
}

#[test]
fn reset_law_holds_for_every_sample_state() {
    let index = bundled();
    let options = FilterOptions::derive(index.records());
    let initial = visible_ids(&index, &FilterState::default());
    for state in sample_states(&options) {
        let reset = transition(state, FilterEvent::Reset);
        assert!(reset.is_unfiltered());
        assert_eq!(visible_ids(&index, &reset), initial);
    }
}

#[test]
fn option_lists_are_sentinel_plus_distinct_values() {
    let index = bundled();
    let options = FilterOptions::derive(index.records());
    for field in FilterField::EVERY {
        let list = options.for_field(field);
        assert_eq!(list[0], ALL);
        let mut seen = BTreeSet::new();
        assert!(list.iter().all(|value| seen.insert(value.clone())), "duplicates in {list:?}");
        let distinct: BTreeSet<&str> = index
            .records()
            .iter()
            .map(|record| field.value_of(record))
            .collect();
        assert_eq!(list.len(), distinct.len() + 1);
        assert!(distinct.iter().all(|value| list.iter().any(|option| option.as_str() == *value)));
    }
    assert_eq!(
        options.category,
        ["all", "Финансы", "Клиенты", "Маркетинг", "Исследования", "Продукт", "HR"]
    );
}

#[test]
fn session_matches_one_shot_view() {
    let index = Arc::new(bundled());
    let options = FilterOptions::derive(index.records());
    let mut session = Session::new(Arc::clone(&index));
    let events = [
        FilterEvent::Search("аналитика".into()),
        FilterEvent::Select(FilterField::Type, Selection::parse("Аналитика")),
        FilterEvent::Select(FilterField::Category, Selection::parse("Продукт")),
        FilterEvent::Search(String::new()),
        FilterEvent::Reset,
    ];
    for event in events {
        session.apply(event);
        let expected = SessionView::compute(&index, &options, session.state())
            .outcome
            .ids();
        assert_eq!(session.view().outcome.ids(), expected);
    }
    assert_eq!(session.view().outcome.count(), 6);
    session.open(RecordId(5)).expect("record 5 visible after reset");
}

#[test]
fn catalog_loads_from_disk() -> Result<()> {
    let dir = TempDir::new()?;
    let path = write_catalog(
        dir.path(),
        vec![
            record_json(10, "Первый", "A", "Актуальный"),
            record_json(11, "Второй", "B", "Черновик"),
            record_json(12, "Третий", "A", "Актуальный"),
        ],
    )?;

    let document = load_catalog_from_path(&path)?;
    assert_eq!(document.records.len(), 3);

    let index = CatalogSource::File(path).load()?;
    assert_eq!(index.title(), "FIXTURE");
    let options = FilterOptions::derive(index.records());
    assert_eq!(options.category, ["all", "A", "B"]);
    assert_eq!(options.status, ["all", "Актуальный", "Черновик"]);

    let state = FilterState {
        category: Selection::parse("A"),
        ..Default::default()
    };
    assert_eq!(visible_ids(&index, &state), vec![10, 12]);
    Ok(())
}

#[test]
fn browse_prints_filtered_cards() -> Result<()> {
    let mut cmd = helper_command("catalog-browse");
    cmd.arg("--search").arg("CRM");
    let out = stdout_text(&run_command(cmd)?);
    assert!(out.contains("Найдено записей: 1"));
    assert!(out.contains("[#2] База клиентов CRM [Актуальный]"));
    assert!(!out.contains("[#1]"));
    Ok(())
}

#[test]
fn browse_empty_result_exits_zero() -> Result<()> {
    let mut cmd = helper_command("catalog-browse");
    cmd.args(["--category", "Продукт", "--search", "HR"]);
    let out = stdout_text(&run_command(cmd)?);
    assert!(out.contains("Найдено записей: 0"));
    assert!(out.contains("Ничего не найдено"));
    Ok(())
}

#[test]
fn browse_json_reports_count_and_flag() -> Result<()> {
    let mut cmd = helper_command("catalog-browse");
    cmd.args(["--status", "Архивный", "--format", "json"]);
    let value: Value = serde_json::from_slice(&run_command(cmd)?.stdout)?;
    assert_eq!(value["count"], 1);
    assert_eq!(value["no_results"], false);
    assert_eq!(value["records"][0]["id"], 4);
    assert_eq!(value["records"][0]["badge"], "secondary");
    assert_eq!(value["filters"]["status"], "Архивный");
    assert_eq!(value["filters"]["category"], "all");
    Ok(())
}

#[test]
fn browse_options_in_json() -> Result<()> {
    let mut cmd = helper_command("catalog-browse");
    cmd.args(["--options", "--format", "json"]);
    let value: Value = serde_json::from_slice(&run_command(cmd)?.stdout)?;
    assert_eq!(value["status"], serde_json::json!(["all", "Актуальный", "Архивный"]));
    assert_eq!(value["type"][0], "all");
    Ok(())
}

#[test]
fn browse_honors_catalog_env() -> Result<()> {
    let dir = TempDir::new()?;
    let path = write_catalog(dir.path(), vec![record_json(7, "Только одна", "X", "Архивный")])?;
    let mut cmd = helper_command("catalog-browse");
    cmd.env("CATALOG_PATH", &path).args(["--format", "json"]);
    let value: Value = serde_json::from_slice(&run_command(cmd)?.stdout)?;
    assert_eq!(value["title"], "FIXTURE");
    assert_eq!(value["count"], 1);
    assert_eq!(value["records"][0]["id"], 7);
    Ok(())
}

#[test]
fn browse_rejects_invalid_catalog() -> Result<()> {
    let dir = TempDir::new()?;
    let path = write_catalog(
        dir.path(),
        vec![record_json(1, "a", "X", "s"), record_json(1, "b", "Y", "s")],
    )?;
    let mut cmd = helper_command("catalog-browse");
    cmd.arg("--catalog").arg(&path);
    let output = cmd.output()?;
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("duplicate record id 1"));
    Ok(())
}

#[test]
fn session_streams_one_view_per_event() -> Result<()> {
    let mut cmd = helper_command("catalog-session");
    cmd.args(["--format", "json"]);
    let input = "\
# comment lines are skipped
search CRM
open 2
open 3
category Финансы
bogus
reset
quit
search never-applied
";
    let output = run_with_stdin(cmd, input)?;
    let stdout = stdout_text(&output);
    let lines: Vec<Value> = stdout
        .lines()
        .map(|line| {
            serde_json::from_str::<Value>(line)
                .with_context(|| format!("stdout line is not JSON: {line:?}"))
        })
        .collect::<Result<_>>()?;
    let (opened, views): (Vec<&Value>, Vec<&Value>) = lines
        .iter()
        .partition(|line| line.get("opened").is_some());
    let counts: Vec<u64> = views
        .iter()
        .map(|view| view["count"].as_u64().unwrap_or(u64::MAX))
        .collect();
    // initial, search, category, reset
    assert_eq!(counts, vec![6, 1, 0, 6]);
    assert_eq!(views[2]["no_results"], true);
    assert_eq!(opened.len(), 1);
    assert_eq!(opened[0]["opened"], 2);
    assert_eq!(opened[0]["title"], "База клиентов CRM");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("record 3 is hidden by the current filters"));
    assert!(stderr.contains("unknown command 'bogus'"));
    Ok(())
}

#[test]
fn session_text_mode_renders_reset_view() -> Result<()> {
    let cmd = helper_command("catalog-session");
    let output = run_with_stdin(cmd, "status Архивный\nopen 4\nreset\n")?;
    let stdout = stdout_text(&output);
    assert!(stdout.contains("open #4: Исследование рынка"));
    assert_eq!(stdout.matches("DATABASE\n").count(), 3);
    assert!(stdout.contains("Найдено записей: 1"));
    assert_eq!(stdout.matches("Найдено записей: 6").count(), 2);
    Ok(())
}
