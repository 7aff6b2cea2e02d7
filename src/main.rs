use harta_core::{
    create_building_table, create_listing_table, export::export_csv, format_results, Currency,
    Gazetteer, ListingPipeline, LocationFilter, PipelineConfig, Result, SearchResults,
};
use harta_scrapers::{
    search_building, CardExtractor, CardMarkup, ScraperFactory, ScraperType as CoreScraperType,
    SearchConfig,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Buildings file used for location matching (-g, --gazetteer)
    #[arg(short = 'g', long, global = true, default_value = "data/buildings.json")]
    gazetteer: PathBuf,

    /// Log at debug level unless RUST_LOG says otherwise (-v, --verbose)
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search sale and rent listings for a building
    #[command(long_about = "Search OLX sale and rent listings for a building or development name and print both sides.")]
    Search(SearchCommand),

    /// List the buildings in the gazetteer
    Buildings(BuildingsCommand),

    /// Run the listing pipeline over saved result pages
    #[command(long_about = "Run the listing pipeline over result pages saved to disk. Each file is one page, processed in the order given.")]
    Parse(ParseCommand),

    /// Export sale and rent listings for a building to CSV
    Export(ExportCommand),
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliScraperType {
    Olx,
}

impl From<CliScraperType> for CoreScraperType {
    fn from(value: CliScraperType) -> Self {
        match value {
            CliScraperType::Olx => CoreScraperType::Olx,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliLocationFilter {
    /// Keep listings from any location
    Off,
    /// Location must contain a known city or district
    Contains,
    /// Location contains, or is contained by, a known city or district
    Bidirectional,
}

impl From<CliLocationFilter> for LocationFilter {
    fn from(value: CliLocationFilter) -> Self {
        match value {
            CliLocationFilter::Off => LocationFilter::Off,
            CliLocationFilter::Contains => LocationFilter::Contains,
            CliLocationFilter::Bidirectional => LocationFilter::Bidirectional,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliCurrency {
    Eur,
    Ron,
}

impl From<CliCurrency> for Currency {
    fn from(value: CliCurrency) -> Self {
        match value {
            CliCurrency::Eur => Currency::Eur,
            CliCurrency::Ron => Currency::Ron,
        }
    }
}

#[derive(Args)]
struct SearchArgs {
    /// The scraper to use (-x, --scraper)
    #[arg(short = 'x', long, value_enum, default_value_t = CliScraperType::Olx)]
    scraper: CliScraperType,

    /// Building or development name to search for (-n, --name)
    #[arg(short = 'n', long)]
    name: String,

    /// Location filter applied to every listing (-l, --location-filter)
    #[arg(short = 'l', long, value_enum)]
    location_filter: CliLocationFilter,

    /// Result pages fetched per side (-c, --max-pages)
    #[arg(short = 'c', long, default_value_t = 2)]
    max_pages: u32,

    /// Currency for sale prices (-s, --sale-currency)
    #[arg(short = 's', long, value_enum, default_value_t = CliCurrency::Eur)]
    sale_currency: CliCurrency,

    /// Currency for rent prices (-r, --rent-currency)
    #[arg(short = 'r', long, value_enum, default_value_t = CliCurrency::Eur)]
    rent_currency: CliCurrency,
}

impl SearchArgs {
    fn search_config(&self) -> SearchConfig {
        SearchConfig {
            max_pages: self.max_pages,
            sale_currency: self.sale_currency.into(),
            rent_currency: self.rent_currency.into(),
        }
    }
}

#[derive(Args)]
struct SearchCommand {
    #[command(flatten)]
    search: SearchArgs,

    /// Print the JSON response instead of tables (-j, --json)
    #[arg(short = 'j', long)]
    json: bool,
}

#[derive(Args)]
struct BuildingsCommand {
    /// Only buildings in this city (-t, --city)
    #[arg(short = 't', long)]
    city: Option<String>,
}

#[derive(Args)]
struct ParseCommand {
    /// Saved result pages, in page order
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Location filter applied to every listing (-l, --location-filter)
    #[arg(short = 'l', long, value_enum)]
    location_filter: CliLocationFilter,

    /// Print JSON instead of a table (-j, --json)
    #[arg(short = 'j', long)]
    json: bool,
}

#[derive(Args)]
struct ExportCommand {
    #[command(flatten)]
    search: SearchArgs,

    /// Output file path (-o, --output)
    #[arg(short = 'o', long, default_value = "listings.csv")]
    output: PathBuf,
}

fn pipeline(location_filter: CliLocationFilter) -> ListingPipeline {
    ListingPipeline::new(PipelineConfig {
        location_filter: location_filter.into(),
        ..PipelineConfig::default()
    })
}

async fn run_search(args: &SearchArgs, gazetteer: &Gazetteer) -> Result<SearchResults> {
    if gazetteer.find_building(&args.name).is_none() {
        warn!("{:?} is not in the gazetteer, searching anyway", args.name);
    }

    let scraper = ScraperFactory::create_scraper(args.scraper.into())?;
    let pipeline = pipeline(args.location_filter);

    Ok(search_building(
        scraper.as_ref(),
        &pipeline,
        gazetteer,
        &args.name,
        &args.search_config(),
    )
    .await)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for results
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let gazetteer = Gazetteer::load(&cli.gazetteer)?;

    match cli.command {
        Commands::Search(cmd) => {
            let results = run_search(&cmd.search, &gazetteer).await?;

            if cmd.json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                print!("{}", format_results(&cmd.search.name, &results));
            }
        }
        Commands::Buildings(cmd) => {
            let buildings: Vec<_> = gazetteer
                .buildings()
                .iter()
                .filter(|b| {
                    cmd.city
                        .as_deref()
                        .map_or(true, |city| b.city.eq_ignore_ascii_case(city.trim()))
                })
                .cloned()
                .collect();

            println!("{}", create_building_table(&buildings));
        }
        Commands::Parse(cmd) => {
            let markup = CardMarkup::olx()?;
            let mut batches = Vec::with_capacity(cmd.files.len());
            for file in &cmd.files {
                let html = std::fs::read_to_string(file)?;
                let cards = markup.extract(&html);
                info!("{}: {} cards", file.display(), cards.len());
                batches.push(cards);
            }

            let listings = pipeline(cmd.location_filter).run_batches(&batches, &gazetteer);
            if cmd.json {
                println!("{}", serde_json::to_string_pretty(&listings)?);
            } else {
                println!("{}", create_listing_table(&listings));
            }
        }
        Commands::Export(cmd) => {
            let results = run_search(&cmd.search, &gazetteer).await?;
            if let Some(error) = &results.error {
                warn!("Exporting partial results: {}", error);
            }

            let rows = export_csv(&cmd.output, &results)?;
            info!("Wrote {} listings to {}", rows, cmd.output.display());
        }
    }

    Ok(())
}
