use clap::Args;
use maintenance_advisor::config::{AppConfig, RankingConfig};
use maintenance_advisor::error::AppError;
use maintenance_advisor::ranking::{DecisionTrace, Ranking, RankingEngine};
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct SourceArgs {
    /// Criteria CSV (key,weight,polarity,label); overrides APP_CRITERIA_CSV
    #[arg(long)]
    pub(crate) criteria_csv: Option<PathBuf>,
    /// Catalog CSV (category,name,<criteria>,<payload>); overrides APP_CATALOG_CSV
    #[arg(long)]
    pub(crate) catalog_csv: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct RankArgs {
    /// Maintenance category produced by the classifier (e.g. Light, Medium, Heavy)
    #[arg(long)]
    pub(crate) category: String,
    /// Only print the first N packages
    #[arg(long)]
    pub(crate) top: Option<usize>,
    /// Print every intermediate matrix and scalar of the run
    #[arg(long)]
    pub(crate) trace: bool,
    #[command(flatten)]
    pub(crate) sources: SourceArgs,
}

#[derive(Args, Debug, Default)]
pub(crate) struct CategoriesArgs {
    #[command(flatten)]
    pub(crate) sources: SourceArgs,
}

fn load_engine(sources: SourceArgs) -> Result<RankingEngine, AppError> {
    let SourceArgs {
        criteria_csv,
        catalog_csv,
    } = sources;
    let configured = AppConfig::load()?.ranking;

    let ranking = RankingConfig {
        criteria_csv: criteria_csv.or(configured.criteria_csv),
        catalog_csv: catalog_csv.or(configured.catalog_csv),
        fallback_category: configured.fallback_category,
    };
    Ok(ranking.ranking_engine()?)
}

pub(crate) fn run_rank(args: RankArgs) -> Result<(), AppError> {
    let RankArgs {
        category,
        top,
        trace,
        sources,
    } = args;

    let engine = load_engine(sources)?;
    let ranking = engine.rank(category.trim())?;
    print!("{}", render_ranking(&ranking, top, trace));
    Ok(())
}

pub(crate) fn run_categories(args: CategoriesArgs) -> Result<(), AppError> {
    let engine = load_engine(args.sources)?;
    let catalog = engine.catalog();

    println!("Configured categories");
    for (category, alternatives) in catalog.categories() {
        let marker = if catalog.fallback() == Some(category) {
            " (fallback)"
        } else {
            ""
        };
        println!("- {}: {} package(s){}", category, alternatives.len(), marker);
    }
    Ok(())
}

pub(crate) fn render_ranking(ranking: &Ranking, top: Option<usize>, with_trace: bool) -> String {
    let mut out = String::new();
    out.push_str(&format!("Service package ranking: {}\n", ranking.category));
    if ranking.fallback_applied {
        out.push_str("Requested category is not configured; fallback catalog used\n");
    }

    let results = match top {
        Some(k) => ranking.top(k),
        None => ranking.results.as_slice(),
    };
    if results.is_empty() {
        out.push_str("\nNo packages configured for this category\n");
        return out;
    }

    out.push_str("\nRank | Package | S+ | S- | Q | Utility\n");
    for result in results {
        let price = result
            .payload
            .get("original_price")
            .map(|price| format!(" (price {price})"))
            .unwrap_or_default();
        out.push_str(&format!(
            "{:>4} | {}{} | {:.4} | {:.4} | {:.4} | {:.2}%\n",
            result.rank, result.name, price, result.s_plus, result.s_minus, result.q, result.utility
        ));
    }

    if with_trace {
        if let Some(trace) = &ranking.trace {
            render_trace(&mut out, trace);
        }
    }
    out
}

fn render_trace(out: &mut String, trace: &DecisionTrace) {
    let header = trace.criteria_labels.join(" | ");
    let weights = trace
        .weights
        .iter()
        .map(|weight| format!("{weight:.2}"))
        .collect::<Vec<_>>()
        .join(" | ");
    out.push_str(&format!("\nCriteria: {header}\nWeights:  {weights}\n"));

    for (title, matrix) in [
        ("Decision matrix", &trace.matrix_raw),
        ("Normalized matrix", &trace.matrix_norm),
        ("Weighted matrix", &trace.matrix_weighted),
    ] {
        out.push_str(&format!("\n{title}\n"));
        for (name, row) in trace.alternatives_names.iter().zip(matrix) {
            let cells = row
                .iter()
                .map(|value| format!("{value:.4}"))
                .collect::<Vec<_>>()
                .join(" | ");
            out.push_str(&format!("- {name}: {cells}\n"));
        }
    }

    let sums = trace
        .col_sums
        .iter()
        .map(|sum| format!("{sum:.4}"))
        .collect::<Vec<_>>()
        .join(" | ");
    out.push_str(&format!("\nColumn sums: {sums}\n"));
    out.push_str(&format!(
        "sum S-: {:.4}, sum 1/S-: {:.4}, Q max: {:.4}\n",
        trace.sum_s_minus, trace.sum_inv_s_minus, trace.q_max
    ));
}
