use std::path::PathBuf;

use clap::Args;
use talent_ops::config::AppConfig;
use talent_ops::error::AppError;
use talent_ops::workflows::evaluations::{
    aggregate, color_band, format_score, RatingSet, TraitKey,
};
use talent_ops::workflows::hierarchy::{
    render, render_outline, CsvProfileStore, ExpansionState, HierarchyBuilder, HierarchyError,
    OrgHierarchyService,
};

use crate::infra::parse_rating;

#[derive(Args, Debug)]
pub(crate) struct OrgTreeArgs {
    /// Profile CSV export (id,full_name,email,role,avatar_url). Defaults to APP_PROFILES_CSV.
    #[arg(long)]
    pub(crate) people_csv: Option<PathBuf>,
    /// Expand every department instead of only the root
    #[arg(long)]
    pub(crate) expand_all: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Trait rating as TRAIT=VALUE, e.g. --rating communication=8
    #[arg(long = "rating", value_parser = parse_rating)]
    pub(crate) ratings: Vec<(TraitKey, String)>,
}

pub(crate) fn run_org_tree(args: OrgTreeArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let Some(path) = args.people_csv.or(config.integrations.profiles_csv) else {
        println!("No profile export configured; pass --people-csv or set APP_PROFILES_CSV");
        return Ok(());
    };

    let service = OrgHierarchyService::new(
        std::sync::Arc::new(CsvProfileStore::new(path)),
        HierarchyBuilder::new(config.organisation.name),
    );
    let view = match service.refresh() {
        Ok(view) => view,
        Err(HierarchyError::EmptyInput(empty)) => {
            println!("{empty}");
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    let expansion = if args.expand_all {
        ExpansionState::expand_all(&view.tree)
    } else {
        view.expansion.clone()
    };
    println!("{} people", view.tree.person_count());
    print!("{}", render_outline(&render(&view.tree, &expansion)));
    Ok(())
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let mut ratings = RatingSet::new();
    for (key, raw) in &args.ratings {
        ratings.set_input(*key, raw);
    }

    println!("Soft-skill ratings");
    for key in TraitKey::ALL {
        println!("  {:<26} {}", key.label(), format_score(ratings.get(key)));
    }

    let average = aggregate(&ratings);
    println!(
        "Average: {} ({})",
        format_score(average),
        color_band(average).label()
    );
    Ok(())
}
