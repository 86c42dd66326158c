use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use vitrine::api::FilterSelection;
use vitrine::era::Era;

/// Returns the version string, including the git hash for non-release builds.
/// Format: "0.3.2" for releases, "0.3.2@abc1234" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("VITRINE_GIT_HASH");
    const IS_RELEASE: &str = env!("VITRINE_IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{}", VERSION, GIT_HASH)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "vitrine", bin_name = "vitrine", version = get_version())]
#[command(about = "Browse a museum catalog by sculptor, era, material and search", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Catalog file to read (overrides the configured data-file)
    #[arg(long, global = true, value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List catalog items matching the filters
    #[command(alias = "ls", display_order = 1)]
    List {
        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Show one item and its neighbours within the filters
    #[command(display_order = 2)]
    Show {
        /// Item id
        id: String,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Show the values each filter accepts
    #[command(display_order = 3)]
    Options,

    /// Interactive kiosk session on stdin
    #[command(display_order = 4)]
    Kiosk,

    /// Get or set configuration
    #[command(display_order = 10)]
    Config {
        /// Config key (data-file, materials, cache-max-age-secs)
        key: Option<String>,

        /// Value to set
        value: Option<String>,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Only items by this sculptor (repeatable)
    #[arg(long = "sculptor", value_name = "NAME")]
    pub sculptors: Vec<String>,

    /// Only items from this era: XVIII, XIX or classicism (repeatable)
    #[arg(long = "era", value_name = "ERA")]
    pub eras: Vec<Era>,

    /// Only items of this material (repeatable)
    #[arg(long = "material", value_name = "MATERIAL")]
    pub materials: Vec<String>,

    /// Free-text search over names, sculptors, locations, dates and texts
    #[arg(short, long)]
    pub search: Option<String>,
}

impl From<FilterArgs> for FilterSelection {
    fn from(args: FilterArgs) -> Self {
        FilterSelection {
            sculptors: args.sculptors,
            eras: args.eras,
            materials: args.materials,
            search: args.search,
        }
    }
}
