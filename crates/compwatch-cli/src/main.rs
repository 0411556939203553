use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use compwatch_core::{BusinessCircleType, RegionLabel};

mod analyze;
mod inspect;
mod setup;

#[derive(Debug, Parser)]
#[command(name = "compwatch-cli")]
#[command(about = "City competitor analysis over store workbooks")]
struct Cli {
    /// YAML file with curated region lists (overrides `COMPWATCH_REGIONS_PATH`)
    #[arg(long, global = true)]
    regions: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print every aggregate and the insight bundle as JSON
    Report {
        file: PathBuf,
        /// Brands to rank (defaults to `COMPWATCH_TOP_BRANDS`)
        #[arg(long)]
        top: Option<usize>,
        #[arg(long)]
        pretty: bool,
    },
    /// Print the filtered, sorted competitor detail view as JSON
    Details {
        file: PathBuf,
        #[arg(long)]
        city: Option<String>,
        /// Business circle type (强/中/弱 or strong/medium/weak)
        #[arg(long, value_parser = parse_circle)]
        circle: Option<BusinessCircleType>,
        /// Region (市区/县城 or urban/county)
        #[arg(long, value_parser = parse_region)]
        region: Option<RegionLabel>,
        /// Case-insensitive substring of the competitor name
        #[arg(long)]
        brand: Option<String>,
        #[arg(long, value_enum)]
        sort: Option<SortArg>,
        #[arg(long, requires = "sort")]
        ascending: bool,
    },
    /// List the competitor slot groups found in a workbook
    Slots { file: PathBuf },
    /// Classify a single store name as urban or county
    Classify {
        store_name: String,
        #[arg(long)]
        city: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SortArg {
    Catalog,
    Subsidy,
}

fn parse_circle(raw: &str) -> Result<BusinessCircleType, String> {
    BusinessCircleType::parse(raw).ok_or_else(|| format!("unknown business circle type '{raw}'"))
}

fn parse_region(raw: &str) -> Result<RegionLabel, String> {
    RegionLabel::parse(raw).ok_or_else(|| format!("unknown region '{raw}'"))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = compwatch_core::load_app_config()?;
    setup::init_tracing(&config.log_level)?;
    let classifier = setup::build_classifier(&config, cli.regions.as_deref())?;

    match cli.command {
        Commands::Report { file, top, pretty } => {
            analyze::run_report(&file, &classifier, top.unwrap_or(config.top_brands), pretty)?;
        }
        Commands::Details {
            file,
            city,
            circle,
            region,
            brand,
            sort,
            ascending,
        } => {
            let filter = compwatch_analysis::DetailFilter {
                city,
                circle_type: circle,
                region,
                brand,
            };
            let sort = sort.map(|key| compwatch_analysis::DetailSort {
                key: match key {
                    SortArg::Catalog => compwatch_analysis::SortKey::CatalogSize,
                    SortArg::Subsidy => compwatch_analysis::SortKey::SubsidyRate,
                },
                ascending,
            });
            analyze::run_details(&file, &classifier, &filter, sort)?;
        }
        Commands::Slots { file } => inspect::run_slots(&file)?,
        Commands::Classify { store_name, city } => {
            inspect::run_classify(&classifier, &store_name, city.as_deref());
        }
    }

    Ok(())
}
