use crate::api::{VerifyOptions, verify_with_config};
use crate::cli::{CheckArgs, OutputFormat};
use crate::fs::{FileSystem, default_fs};
use crate::input;
use crate::model::Verdict;
use crate::output::{JsonOutput, MarkdownOutput, OutputFormatter, TextOutput};
use crate::style;
use std::io::{self, Write};

use super::{CommandContext, EXIT_ABORTED};

pub fn cmd_check(args: CheckArgs) -> i32 {
    cmd_check_with_fs(args, default_fs())
}

pub fn cmd_check_with_fs(args: CheckArgs, fs: &dyn FileSystem) -> i32 {
    let options = VerifyOptions {
        internal_marker: args.internal_marker.clone(),
        on_unresolved: args.on_unresolved,
        root_package: args.root_package.clone(),
        module: args.module.clone(),
    };

    let ctx = match CommandContext::new(&args.path, &options, fs) {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };

    let units = match input::load_units(&ctx.path, fs) {
        Ok(units) => units,
        Err(e) => {
            style::error(&e.to_string());
            return EXIT_ABORTED;
        }
    };

    let verdict = match verify_with_config(&units, &ctx.config, args.module.as_deref()) {
        Ok(verdict) => verdict,
        Err(e) => {
            style::error(&e.to_string());
            style::hint("fix the unit manifests and run again; no verdict was produced");
            return EXIT_ABORTED;
        }
    };

    for reference in &verdict.unresolved {
        style::warning(&format!(
            "skipped unresolved reference {} -> {}",
            reference.unit, reference.symbol
        ));
    }

    let rendered = match render(&verdict, &args, &ctx.path) {
        Ok(rendered) => rendered,
        Err(e) => {
            style::error(&format!("Failed to format output: {}", e));
            return EXIT_ABORTED;
        }
    };

    let write_result = match &args.output {
        Some(output_path) => fs.write(output_path, &rendered),
        None => {
            let mut stdout = io::stdout();
            if args.format == OutputFormat::Markdown {
                style::render_markdown(&rendered, &mut stdout)
            } else {
                write!(stdout, "{}", rendered)
            }
        }
    };

    if let Err(e) = write_result {
        style::error(&format!("Failed to write output: {}", e));
        return EXIT_ABORTED;
    }

    if args.output.is_some() || args.format != OutputFormat::Text {
        eprintln!("{}", style::verdict_summary(&verdict));
    }

    verdict.exit_code()
}

fn render(verdict: &Verdict, args: &CheckArgs, path: &std::path::Path) -> io::Result<String> {
    match args.format {
        OutputFormat::Text => TextOutput::new(args.verbose).render(verdict),
        OutputFormat::Markdown => MarkdownOutput::new(project_name(path)).render(verdict),
        OutputFormat::Json => JsonOutput::new().render(verdict),
    }
}

/// `bookstore` for `bookstore.units.json` or for a `bookstore/` directory.
fn project_name(path: &std::path::Path) -> String {
    let resolved = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    resolved
        .file_name()
        .and_then(|n| n.to_str())
        .and_then(|n| n.split('.').next())
        .filter(|n| !n.is_empty())
        .unwrap_or("project")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UnresolvedPolicy;
    use crate::fs::mock::MockFs;
    use std::path::{Path, PathBuf};

    const BOOKSTORE: &str = r#"{"units": [
        {"qualifiedName": "orders.OrderService",
         "referencedSymbols": ["orders.internal.OrderValidator"]},
        {"qualifiedName": "orders.internal.OrderValidator"},
        {"qualifiedName": "inventory.InventoryService",
         "referencedSymbols": ["orders.OrderService", "orders.internal.OrderValidator",
                               "org.springframework.stereotype.Service"]}
    ]}"#;

    fn args(output: &str) -> CheckArgs {
        CheckArgs {
            path: PathBuf::from("/app/bookstore.units.json"),
            output: Some(PathBuf::from(output)),
            ..Default::default()
        }
    }

    #[test]
    fn test_failing_check_writes_report() {
        let fs = MockFs::with_files([("/app/bookstore.units.json", BOOKSTORE)]);

        let code = cmd_check_with_fs(args("/app/report.txt"), &fs);

        assert_eq!(code, 1);
        let report = fs.contents(Path::new("/app/report.txt")).unwrap();
        assert!(report.starts_with("Verdict: FAIL\n"));
        assert!(report.contains(
            "  inventory.InventoryService -> orders.internal.OrderValidator (internal)\n"
        ));
    }

    #[test]
    fn test_module_filter_passes_clean_module() {
        let fs = MockFs::with_files([("/app/bookstore.units.json", BOOKSTORE)]);

        let code = cmd_check_with_fs(
            CheckArgs {
                module: Some("orders".to_string()),
                ..args("/app/orders.txt")
            },
            &fs,
        );

        assert_eq!(code, 0);
    }

    #[test]
    fn test_fail_policy_aborts_without_report() {
        let fs = MockFs::with_files([("/app/bookstore.units.json", BOOKSTORE)]);

        let code = cmd_check_with_fs(
            CheckArgs {
                on_unresolved: Some(UnresolvedPolicy::Fail),
                ..args("/app/report.txt")
            },
            &fs,
        );

        assert_eq!(code, EXIT_ABORTED);
        assert!(fs.contents(Path::new("/app/report.txt")).is_none());
    }

    #[test]
    fn test_project_name() {
        assert_eq!(project_name(Path::new("/app/bookstore.units.json")), "bookstore");
        assert_eq!(project_name(Path::new("/srv/shop")), "shop");
    }

    #[test]
    fn test_missing_input_aborts() {
        let fs = MockFs::new();
        assert_eq!(cmd_check_with_fs(args("/app/report.txt"), &fs), EXIT_ABORTED);
    }
}
