use crate::domain::model::{Bounds, DataReturnMode, SpatialQueryMode};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "iserver-client")]
#[command(about = "Query and analyse data on an iServer REST service")]
pub struct CliArgs {
    /// TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Service URL, overrides `server.url`
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Access token, overrides `server.token`
    #[arg(long, global = true)]
    pub token: Option<String>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Print the request instead of sending it
    #[arg(long, global = true)]
    pub dry_run: bool,

    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Csv,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Features inside a rectangle
    Bounds(BoundsArgs),
    /// Features by ID
    Ids(IdsArgs),
    /// Features matching an attribute filter
    Sql(SqlArgs),
    /// Facility analysis on a 3D network
    Facility(FacilityArgs),
    /// Publish a dot density theme as a temporary layer
    DotDensity(DotDensityArgs),
    /// Dynamic segmentation of an event table along routes
    GenerateSpatialData(GenerateSpatialDataArgs),
    /// List the layers of a map
    Layers,
}

/// Paging options shared by the feature queries; unset values come from `[query]`.
#[derive(Debug, Clone, Default, Args)]
pub struct PagingArgs {
    #[arg(long)]
    pub from_index: Option<i64>,
    #[arg(long)]
    pub to_index: Option<i64>,
    #[arg(long)]
    pub max_features: Option<i64>,
}

#[derive(Debug, Clone, Args)]
pub struct BoundsArgs {
    /// `left,bottom,right,top`
    #[arg(long, allow_hyphen_values = true)]
    pub bounds: Bounds,
    #[arg(long = "dataset", value_delimiter = ',', required = true)]
    pub datasets: Vec<String>,
    #[arg(long, value_delimiter = ',')]
    pub fields: Vec<String>,
    #[arg(long)]
    pub attribute_filter: Option<String>,
    #[arg(long, default_value = "CONTAIN")]
    pub spatial_query_mode: SpatialQueryMode,
    #[command(flatten)]
    pub paging: PagingArgs,
}

#[derive(Debug, Clone, Args)]
pub struct IdsArgs {
    #[arg(long, value_delimiter = ',', required = true)]
    pub ids: Vec<i64>,
    #[arg(long = "dataset", value_delimiter = ',', required = true)]
    pub datasets: Vec<String>,
    #[arg(long, value_delimiter = ',')]
    pub fields: Vec<String>,
    #[command(flatten)]
    pub paging: PagingArgs,
}

#[derive(Debug, Clone, Args)]
pub struct SqlArgs {
    #[arg(long)]
    pub attribute_filter: String,
    #[arg(long = "dataset", value_delimiter = ',', required = true)]
    pub datasets: Vec<String>,
    #[arg(long, value_delimiter = ',')]
    pub fields: Vec<String>,
    #[arg(long)]
    pub order_by: Option<String>,
    #[arg(long)]
    pub group_by: Option<String>,
    #[command(flatten)]
    pub paging: PagingArgs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FacilityKind {
    Sinks,
    Sources,
    TraceUp,
    TraceDown,
    Upstream,
}

#[derive(Debug, Clone, Args)]
pub struct FacilityArgs {
    #[arg(value_enum)]
    pub kind: FacilityKind,
    #[arg(long)]
    pub edge_id: Option<i64>,
    #[arg(long)]
    pub node_id: Option<i64>,
    #[arg(long)]
    pub weight_name: Option<String>,
    #[arg(long)]
    pub uncertain_direction_valid: bool,
    /// Candidate source nodes, `upstream` only
    #[arg(long, value_delimiter = ',')]
    pub source_node_ids: Vec<i64>,
}

#[derive(Debug, Clone, Args)]
pub struct DotDensityArgs {
    /// `name@datasource`
    #[arg(long)]
    pub dataset: String,
    #[arg(long)]
    pub dot_expression: String,
    /// Quantity represented by one dot
    #[arg(long)]
    pub value: f64,
}

#[derive(Debug, Clone, Args)]
pub struct GenerateSpatialDataArgs {
    #[arg(long)]
    pub route_table: String,
    #[arg(long)]
    pub event_table: String,
    #[arg(long)]
    pub route_id_field: String,
    #[arg(long)]
    pub event_route_id_field: String,
    #[arg(long, conflicts_with_all = ["measure_start_field", "measure_end_field"])]
    pub measure_field: Option<String>,
    #[arg(long, requires = "measure_end_field")]
    pub measure_start_field: Option<String>,
    #[arg(long, requires = "measure_start_field")]
    pub measure_end_field: Option<String>,
    #[arg(long)]
    pub measure_offset_field: Option<String>,
    #[arg(long)]
    pub error_info_field: Option<String>,
    #[arg(long, value_delimiter = ',')]
    pub retained_fields: Vec<String>,
    /// Name of the result dataset
    #[arg(long)]
    pub result_dataset: Option<String>,
    #[arg(long, default_value = "RECORDSET_ONLY")]
    pub data_return_mode: DataReturnMode,
}
