use clap::Parser;
use iserver_client::app::output::{write_csv, write_json, CsvTable};
use iserver_client::config::cli::{
    BoundsArgs, CliArgs, Command, DotDensityArgs, FacilityArgs, FacilityKind,
    GenerateSpatialDataArgs, IdsArgs, OutputFormat, PagingArgs, SqlArgs,
};
use iserver_client::config::{ClientConfig, QueryConfig};
use iserver_client::core::request::redact_credentials;
use iserver_client::params::{
    DataReturnOption, FacilityAnalystSinks3DParameters, FacilityAnalystSources3DParameters,
    FacilityAnalystTracedown3DParameters, FacilityAnalystTraceup3DParameters,
    FacilityAnalystUpstream3DParameters, FilterParameter, GenerateSpatialDataParameters,
    GetFeaturesByBoundsParameters, GetFeaturesByIDsParameters, GetFeaturesBySQLParameters,
    GetLayersInfoParameters, ThemeDotDensity, ThemeParameters,
};
use iserver_client::utils::error::{ClientError, ErrorSeverity, Result};
use iserver_client::utils::{logger, validation::Validate};
use iserver_client::{
    FeatureService, LayerInfoService, NetworkAnalyst3DService, ServiceBase, ServiceOperation,
    SpatialAnalystService, ThemeService,
};
use serde::Serialize;
use url::Url;

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            logger::init_cli_logger(args.verbose, "info");
            tracing::error!("Configuration validation failed: {}", e);
            exit_with(&e);
        }
    };

    let level = config.logging.level.to_lowercase();
    if config.logging.json {
        logger::init_json_logger(args.verbose, &level);
    } else {
        logger::init_cli_logger(args.verbose, &level);
    }

    tracing::info!(
        "Starting iserver-client against {}",
        Url::parse(&config.server.url)
            .map(|url| redact_credentials(&url))
            .unwrap_or_default()
    );

    if let Err(e) = run(&args, &config).await {
        tracing::error!(
            "Request failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        exit_with(&e);
    }
}

fn exit_with(e: &ClientError) -> ! {
    eprintln!("{}", e.user_friendly_message());
    eprintln!("Suggestion: {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}

/// File configuration, if any, with `--url` and `--token` applied on top.
fn load_config(args: &CliArgs) -> Result<ClientConfig> {
    let mut config = match (&args.config, &args.url) {
        (Some(path), _) => ClientConfig::from_file(path)?,
        (None, Some(url)) => ClientConfig::for_url(url.clone()),
        (None, None) => {
            return Err(ClientError::MissingConfigError {
                field: "server.url (--url or --config)".to_string(),
            })
        }
    };

    if let Some(url) = &args.url {
        config.server.url = url.clone();
    }
    if let Some(token) = &args.token {
        config.server.token = Some(token.clone());
    }

    config.validate()?;
    Ok(config)
}

async fn run(args: &CliArgs, config: &ClientConfig) -> Result<()> {
    let url = config.server.url.as_str();
    let options = config.service_options();

    match &args.command {
        Command::Bounds(bounds) => {
            let params = bounds_parameters(bounds, &config.query);
            let service = FeatureService::new(url, options)?;
            if ready_to_send(service.base(), &params, args.dry_run)? {
                emit(&service.get_features_by_bounds(&params).await?, args.format)?;
            }
        }
        Command::Ids(ids) => {
            let params = ids_parameters(ids, &config.query);
            let service = FeatureService::new(url, options)?;
            if ready_to_send(service.base(), &params, args.dry_run)? {
                emit(&service.get_features_by_ids(&params).await?, args.format)?;
            }
        }
        Command::Sql(sql) => {
            let params = sql_parameters(sql, &config.query);
            let service = FeatureService::new(url, options)?;
            if ready_to_send(service.base(), &params, args.dry_run)? {
                emit(&service.get_features_by_sql(&params).await?, args.format)?;
            }
        }
        Command::Facility(facility) => {
            let service = NetworkAnalyst3DService::new(url, options)?;
            run_facility(&service, facility, args).await?;
        }
        Command::DotDensity(dot_density) => {
            let params = dot_density_parameters(dot_density)?;
            let service = ThemeService::new(url, options)?;
            if ready_to_send(service.base(), &params, args.dry_run)? {
                let result = service.get_theme_info(&params).await?;
                if let Some(id) = &result.new_resource_id {
                    tracing::info!("Temporary layer set created: {}", id);
                }
                emit(&result, args.format)?;
            }
        }
        Command::GenerateSpatialData(spatial) => {
            let params = generate_spatial_data_parameters(spatial);
            let service = SpatialAnalystService::new(url, options)?;
            if ready_to_send(service.base(), &params, args.dry_run)? {
                emit(&service.generate_spatial_data(&params).await?, args.format)?;
            }
        }
        Command::Layers => {
            let service = LayerInfoService::new(url, options)?;
            if args.dry_run {
                print_request(service.base(), &GetLayersInfoParameters)?;
            } else {
                emit(&service.get_layers_info().await?, args.format)?;
            }
        }
    }

    Ok(())
}

async fn run_facility(
    service: &NetworkAnalyst3DService,
    facility: &FacilityArgs,
    args: &CliArgs,
) -> Result<()> {
    let edge_id = facility.edge_id;
    let node_id = facility.node_id;
    let weight_name = facility.weight_name.clone();
    let is_uncertain_direction_valid = facility.uncertain_direction_valid;

    match facility.kind {
        FacilityKind::Sinks => {
            let params = FacilityAnalystSinks3DParameters {
                edge_id,
                node_id,
                weight_name,
                is_uncertain_direction_valid,
            };
            if ready_to_send(service.base(), &params, args.dry_run)? {
                emit(&service.sinks_facility_analyst(&params).await?, args.format)?;
            }
        }
        FacilityKind::Sources => {
            let params = FacilityAnalystSources3DParameters {
                edge_id,
                node_id,
                weight_name,
                is_uncertain_direction_valid,
            };
            if ready_to_send(service.base(), &params, args.dry_run)? {
                emit(&service.sources_facility_analyst(&params).await?, args.format)?;
            }
        }
        FacilityKind::TraceUp => {
            let params = FacilityAnalystTraceup3DParameters {
                edge_id,
                node_id,
                weight_name,
                is_uncertain_direction_valid,
            };
            if ready_to_send(service.base(), &params, args.dry_run)? {
                emit(&service.trace_up_facility_analyst(&params).await?, args.format)?;
            }
        }
        FacilityKind::TraceDown => {
            let params = FacilityAnalystTracedown3DParameters {
                edge_id,
                node_id,
                weight_name,
                is_uncertain_direction_valid,
            };
            if ready_to_send(service.base(), &params, args.dry_run)? {
                emit(&service.trace_down_facility_analyst(&params).await?, args.format)?;
            }
        }
        FacilityKind::Upstream => {
            let params = FacilityAnalystUpstream3DParameters {
                source_node_ids: Some(facility.source_node_ids.clone()),
                edge_id,
                node_id,
                weight_name,
                is_uncertain_direction_valid,
            };
            if ready_to_send(service.base(), &params, args.dry_run)? {
                emit(&service.upstream_facility_analyst(&params).await?, args.format)?;
            }
        }
    }

    Ok(())
}

fn paging(args: &PagingArgs, defaults: &QueryConfig) -> (i64, i64, i64) {
    (
        args.from_index.unwrap_or(defaults.from_index),
        args.to_index.unwrap_or(defaults.to_index),
        args.max_features.unwrap_or(defaults.max_features),
    )
}

fn bounds_parameters(args: &BoundsArgs, defaults: &QueryConfig) -> GetFeaturesByBoundsParameters {
    let (from_index, to_index, max_features) = paging(&args.paging, defaults);
    let mut params = GetFeaturesByBoundsParameters::new(args.bounds)
        .with_dataset_names(args.datasets.clone())
        .with_spatial_query_mode(args.spatial_query_mode)
        .with_range(from_index, to_index)
        .with_max_features(max_features);
    if !args.fields.is_empty() {
        params = params.with_fields(args.fields.clone());
    }
    if let Some(filter) = &args.attribute_filter {
        params = params.with_attribute_filter(filter.clone());
    }
    params
}

fn ids_parameters(args: &IdsArgs, defaults: &QueryConfig) -> GetFeaturesByIDsParameters {
    let (from_index, to_index, max_features) = paging(&args.paging, defaults);
    let mut params = GetFeaturesByIDsParameters::new(args.ids.clone())
        .with_dataset_names(args.datasets.clone())
        .with_range(from_index, to_index)
        .with_max_features(max_features);
    if !args.fields.is_empty() {
        params = params.with_fields(args.fields.clone());
    }
    params
}

fn sql_parameters(args: &SqlArgs, defaults: &QueryConfig) -> GetFeaturesBySQLParameters {
    let (from_index, to_index, max_features) = paging(&args.paging, defaults);
    let mut filter = FilterParameter::new().with_attribute_filter(args.attribute_filter.clone());
    if let Some(name) = args.datasets.first() {
        filter = filter.with_name(name.clone());
    }
    if !args.fields.is_empty() {
        filter = filter.with_fields(args.fields.clone());
    }
    if let Some(order_by) = &args.order_by {
        filter = filter.with_order_by(order_by.clone());
    }
    if let Some(group_by) = &args.group_by {
        filter = filter.with_group_by(group_by.clone());
    }

    GetFeaturesBySQLParameters::new(filter)
        .with_dataset_names(args.datasets.clone())
        .with_range(from_index, to_index)
        .with_max_features(max_features)
}

fn dot_density_parameters(args: &DotDensityArgs) -> Result<ThemeParameters> {
    let (dataset, data_source) =
        args.dataset
            .split_once('@')
            .ok_or_else(|| ClientError::InvalidParameter {
                field: "dataset".to_string(),
                reason: format!("expected name@datasource, got '{}'", args.dataset),
            })?;

    let theme = ThemeDotDensity::new(args.dot_expression.clone(), args.value);
    Ok(ThemeParameters::new(vec![theme.into()]).with_dataset(dataset, data_source))
}

fn generate_spatial_data_parameters(args: &GenerateSpatialDataArgs) -> GenerateSpatialDataParameters {
    let mut params =
        GenerateSpatialDataParameters::new(args.route_table.clone(), args.event_table.clone())
            .with_route_id_fields(args.route_id_field.clone(), args.event_route_id_field.clone())
            .with_data_return_option(DataReturnOption {
                dataset: args.result_dataset.clone(),
                data_return_mode: args.data_return_mode,
                ..DataReturnOption::default()
            });

    if let Some(field) = &args.measure_field {
        params = params.with_measure_field(field.clone());
    }
    if let (Some(start), Some(end)) = (&args.measure_start_field, &args.measure_end_field) {
        params = params.with_measure_range(start.clone(), end.clone());
    }
    if let Some(field) = &args.measure_offset_field {
        params = params.with_measure_offset_field(field.clone());
    }
    if let Some(field) = &args.error_info_field {
        params = params.with_error_info_field(field.clone());
    }
    if !args.retained_fields.is_empty() {
        params = params.with_retained_fields(args.retained_fields.clone());
    }
    params
}

/// Validates `params`; on a dry run prints the request instead. Returns whether to send it.
fn ready_to_send<O: ServiceOperation + Validate>(
    base: &ServiceBase,
    params: &O,
    dry_run: bool,
) -> Result<bool> {
    params.validate()?;
    if dry_run {
        print_request(base, params)?;
        return Ok(false);
    }
    Ok(true)
}

fn print_request<O: ServiceOperation>(base: &ServiceBase, params: &O) -> Result<()> {
    let request = base.prepare(params)?;
    let body = request
        .body
        .as_deref()
        .map(serde_json::from_str::<serde_json::Value>)
        .transpose()?;

    write_json(
        &serde_json::json!({
            "method": request.method.as_str(),
            "url": redact_credentials(&request.url),
            "body": body,
        }),
        std::io::stdout().lock(),
    )
}

fn emit<T: Serialize + CsvTable>(value: &T, format: OutputFormat) -> Result<()> {
    let stdout = std::io::stdout().lock();
    match format {
        OutputFormat::Json => write_json(value, stdout),
        OutputFormat::Csv => write_csv(value, stdout),
    }
}
