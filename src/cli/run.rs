//! Headless search runs for the `page-find` binary.

use super::{Action, RuntimeOptions, SearchOptions};
use crate::content::ContentRoot;
use crate::search::{ResultDisplay, SearchController};
use crate::store::{FileStore, KeyValueStore};
use crate::viewport::{LineViewport, Viewport};
use anyhow::{Context, Result};
use page_find_config::{Config, SearchConfig};
use std::fs;

/// Execute the requested action. Returns the process exit code.
pub fn execute(options: &RuntimeOptions) -> Result<i32> {
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            log::warn!("Failed to load config, using defaults: {}", e);
            Config::default()
        }
    };

    let store_path = options.store.clone().unwrap_or_else(FileStore::default_path);
    let store = FileStore::open(&store_path)
        .with_context(|| format!("Failed to open store {}", store_path.display()))?;

    match &options.action {
        Action::ShowHistory => {
            let mut controller = SearchController::new(
                ContentRoot::default(),
                store,
                LineViewport::new(20.0, 600.0, 600.0),
                &config.search,
            );
            controller.show();
            for entry in controller.history().entries() {
                println!("{entry}");
            }
            Ok(0)
        }
        Action::Search(search) => {
            let source = fs::read_to_string(&search.file)
                .with_context(|| format!("Failed to read {}", search.file.display()))?;
            let (report, code) = run_search(&source, search, store, &config.search);
            match code {
                0 => print!("{report}"),
                _ => eprint!("{report}"),
            }
            Ok(code)
        }
    }
}

/// Run one search over `source` and render the outcome.
///
/// Returns the report and an exit code: 0 on success, 1 when the query does
/// not compile.
pub fn run_search<S: KeyValueStore>(
    source: &str,
    options: &SearchOptions,
    store: S,
    config: &SearchConfig,
) -> (String, i32) {
    let viewport = LineViewport::new(
        options.line_height,
        options.viewport_height,
        options.track_height,
    );
    let config = SearchConfig {
        match_case: options.match_case,
        use_regex: options.use_regex,
        ..config.clone()
    };
    let mut controller =
        SearchController::new(ContentRoot::from_markup(source), store, viewport, &config);

    controller.show();
    controller.set_input(options.query.clone());
    let found = controller.search();
    if !found && controller.view().error.open {
        let message = format!("page-find: invalid pattern: {}\n", controller.view().error.text);
        controller.hide();
        return (message, 1);
    }

    if found {
        for _ in 0..options.next {
            controller.advance_forward();
        }
        for _ in 0..options.prev {
            controller.advance_backward();
        }
    }

    let report = report(&controller);
    controller.hide();
    (report, 0)
}

/// Render the highlighted markup, the status line and the landmarks.
pub fn report<S: KeyValueStore, V: Viewport>(controller: &SearchController<S, V>) -> String {
    let mut out = controller.content().to_markup();
    if !out.ends_with('\n') {
        out.push('\n');
    }

    match controller.view().result {
        ResultDisplay::Hidden => {}
        ResultDisplay::NoResults => out.push_str("No results\n"),
        ResultDisplay::Count { current, total } => {
            out.push_str(&format!("{current} of {total}\n"));
        }
    }

    if !controller.landmarks().is_empty() {
        let positions: Vec<String> = controller
            .landmarks()
            .iter()
            .map(|l| format!("{:.1}", l.top))
            .collect();
        out.push_str(&format!("landmarks: {}\n", positions.join(" ")));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use std::path::PathBuf;

    fn options(query: &str) -> SearchOptions {
        SearchOptions {
            file: PathBuf::from("page.html"),
            query: query.to_string(),
            match_case: false,
            use_regex: false,
            next: 1,
            prev: 0,
            line_height: 10.0,
            viewport_height: 100.0,
            track_height: 100.0,
        }
    }

    #[test]
    fn test_run_search_reports_matches() {
        let source = "<p>one fox</p>\n<p>two fox</p>";
        let (report, code) = run_search(
            source,
            &options("fox"),
            MemoryStore::new(),
            &SearchConfig::default(),
        );
        assert_eq!(code, 0);
        assert!(report.contains(r#"one <span class="highlight point">fox</span>"#));
        assert!(report.contains(r#"two <span class="highlight">fox</span>"#));
        assert!(report.contains("1 of 2\n"));
        assert!(report.contains("landmarks: "));
    }

    #[test]
    fn test_run_search_steps() {
        let source = "<p>a</p><p>a</p><p>a</p>";
        let mut opts = options("a");
        opts.next = 2;
        opts.prev = 3;
        let (report, _) = run_search(source, &opts, MemoryStore::new(), &SearchConfig::default());
        assert!(report.contains("2 of 3\n"));
    }

    #[test]
    fn test_run_search_no_results() {
        let (report, code) = run_search(
            "<p>text</p>",
            &options("zebra"),
            MemoryStore::new(),
            &SearchConfig::default(),
        );
        assert_eq!(code, 0);
        assert!(report.ends_with("No results\n"));
    }

    #[test]
    fn test_run_search_invalid_regex() {
        let mut opts = options("[");
        opts.use_regex = true;
        let (report, code) =
            run_search("<p>[</p>", &opts, MemoryStore::new(), &SearchConfig::default());
        assert_eq!(code, 1);
        assert!(report.starts_with("page-find: invalid pattern: "));
    }

    #[test]
    fn test_landmarks_scale_to_viewport_content() {
        // 100px of content in a 200px viewport, projected onto a 40px track
        let source = "<p>x</p>".repeat(9) + "<p>needle</p>";
        let mut opts = options("needle");
        opts.viewport_height = 200.0;
        opts.track_height = 40.0;
        let (report, _) = run_search(&source, &opts, MemoryStore::new(), &SearchConfig::default());
        assert!(report.ends_with("landmarks: 19.0\n"));
    }

    #[test]
    fn test_landmarks_unscaled_on_tall_track() {
        let mut opts = options("needle");
        opts.viewport_height = 50.0;
        opts.track_height = 200.0;
        let (report, _) = run_search(
            "<p>a</p><p>needle</p>",
            &opts,
            MemoryStore::new(),
            &SearchConfig::default(),
        );
        assert!(report.ends_with("landmarks: 15.0\n"));
    }
}
