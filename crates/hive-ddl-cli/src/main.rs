//! hive-ddl CLI - Hive table definitions for imported relational tables.

use clap::{Parser, Subcommand};
use hive_ddl::core::{SchemaIntrospector, SqlType, TypeMapper};
use hive_ddl::{Config, DdlError, HiveTypeMapper, StaticSchema, TimeValue};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "hive-ddl")]
#[command(about = "Generate Hive CREATE TABLE and LOAD DATA statements for imported tables")]
#[command(version)]
struct Cli {
    /// Path to YAML configuration file
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Path to YAML schema file describing the source tables
    #[arg(long, env = "HIVE_DDL_SCHEMA")]
    schema: Option<PathBuf>,

    /// Output JSON result to stdout
    #[arg(long)]
    output_json: bool,

    /// Log format: text or json
    #[arg(long, default_value = "text")]
    log_format: String,

    /// Log verbosity: debug, info, warn, error
    #[arg(long, default_value = "info")]
    verbosity: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print both the CREATE TABLE and LOAD DATA statements
    Generate {
        /// Override the output (Hive) table name
        #[arg(long)]
        output_table: Option<String>,

        /// Include the "Imported by" table comment
        #[arg(long)]
        comments: bool,
    },

    /// Print only the CREATE TABLE statement
    CreateTable {
        /// Include the "Imported by" table comment
        #[arg(long)]
        comments: bool,
    },

    /// Print only the LOAD DATA statement
    LoadData,

    /// Show the Hive type for a JDBC type name or code
    MapType {
        /// JDBC type name (VARCHAR) or numeric code (12)
        sql_type: String,
    },

    /// Parse a time of day and print it in canonical form
    Time {
        /// Time text, hh:mm:ss[.fraction]
        text: String,
    },
}

#[derive(Serialize)]
struct TypeReport {
    sql_type: String,
    code: i32,
    hive_type: &'static str,
    approximate: bool,
}

#[derive(Serialize)]
struct TimeReport {
    canonical: String,
    hour: u32,
    minute: u32,
    second: u32,
    nanos: u32,
    fraction_digits: u32,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.format_detailed());
            ExitCode::from(e.exit_code())
        }
    }
}

fn run() -> Result<(), DdlError> {
    let cli = Cli::parse();

    setup_logging(&cli.verbosity, &cli.log_format).map_err(DdlError::Config)?;

    // Inspection commands need no configuration
    match &cli.command {
        Commands::MapType { sql_type } => return map_type(sql_type, cli.output_json),
        Commands::Time { text } => return show_time(text, cli.output_json),
        _ => {}
    }

    let mut config = Config::load(&cli.config)?;
    info!("Loaded configuration from {:?}", cli.config);

    let schema = match &cli.schema {
        Some(path) => {
            let schema = StaticSchema::load(path)?;
            info!("Loaded schema for {} tables from {:?}", schema.len(), path);
            Some(schema)
        }
        None => None,
    };
    let introspector = schema.as_ref().map(|s| s as &dyn SchemaIntrospector);

    match cli.command {
        Commands::MapType { .. } | Commands::Time { .. } => unreachable!(), // Handled above
        Commands::Generate {
            output_table,
            comments,
        } => {
            if let Some(name) = output_table {
                config.table.output = Some(name);
                config.validate()?;
            }
            let writer = config
                .table_def_writer(introspector)
                .with_comments(comments || config.hive.comments);
            let definition = writer.generate()?;

            if cli.output_json {
                println!("{}", serde_json::to_string_pretty(&definition)?);
            } else {
                println!("{}", definition.create_table);
                println!("{}", definition.load_data);
            }
        }
        Commands::CreateTable { comments } => {
            let statement = config
                .table_def_writer(introspector)
                .with_comments(comments || config.hive.comments)
                .create_table_stmt()?;
            print_statement("create_table", &statement, cli.output_json)?;
        }
        Commands::LoadData => {
            let statement = config.table_def_writer(introspector).load_data_stmt()?;
            print_statement("load_data", &statement, cli.output_json)?;
        }
    }

    Ok(())
}

fn print_statement(key: &str, statement: &str, json: bool) -> Result<(), DdlError> {
    if json {
        let value = serde_json::json!({ key: statement });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{}", statement);
    }
    Ok(())
}

fn map_type(text: &str, json: bool) -> Result<(), DdlError> {
    let sql_type: SqlType = text.parse()?;
    let mapper = HiveTypeMapper::new();
    let hive_type = mapper.to_hive_type(sql_type).ok_or_else(|| {
        DdlError::Schema(format!("Hive does not support the SQL type {}", sql_type))
    })?;

    let report = TypeReport {
        sql_type: sql_type.to_string(),
        code: sql_type.code(),
        hive_type,
        approximate: mapper.is_approximate(sql_type),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if report.approximate {
        println!("{} (approximate)", report.hive_type);
    } else {
        println!("{}", report.hive_type);
    }
    Ok(())
}

fn show_time(text: &str, json: bool) -> Result<(), DdlError> {
    let time: TimeValue = text.parse()?;

    if json {
        let report = TimeReport {
            canonical: time.to_string(),
            hour: time.hour(),
            minute: time.minute(),
            second: time.second(),
            nanos: time.nanos(),
            fraction_digits: time.fraction_digits(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", time);
    }
    Ok(())
}

fn setup_logging(verbosity: &str, format: &str) -> Result<(), String> {
    let level = match verbosity.to_lowercase().as_str() {
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // Statements go to stdout, logs to stderr
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false);

    let result = match format {
        "json" => subscriber.json().try_init(),
        "text" => subscriber.try_init(),
        other => return Err(format!("Unknown log format '{}' (expected text or json)", other)),
    };

    result.map_err(|e| e.to_string())
}
