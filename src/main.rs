//! Floor Placement CLI
//!
//! Usage:
//!   floor-placement [OPTIONS] <LAYOUT> <COMMAND>
//!
//! Options:
//!   -c, --config <FILE>  Placement configuration (TOML format)
//!   -f, --floor <ID>     Floor to operate on (defaults to the first floor)
//!   -v, --verbose        Log engine decisions to stderr
//!   -h, --help           Print help

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use thiserror::Error;
use tracing::info;

use floor_placement::layout::{ConfigError, Handle};
use floor_placement::repository::{read_location, write_location};
use floor_placement::{
    audit, Delta, Floor, Location, ObjectKind, ObjectPatch, ObjectStatus, PlacementConfig,
    PlacementEngine, PlacementError, Point, RepositoryError,
};

#[derive(Parser)]
#[command(name = "floor-placement")]
#[command(about = "Collision-free placement of bookable objects on venue floor plans")]
struct Cli {
    /// Layout file (JSON)
    layout: PathBuf,

    /// Placement configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Floor to operate on (defaults to the first floor)
    #[arg(short, long)]
    floor: Option<String>,

    /// Log engine decisions to stderr
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a new layout file with a single empty floor
    Init {
        /// Location id
        id: String,
        /// Location name
        name: String,
    },
    /// Print floors and objects
    Show,
    /// Report overlaps, duplicate ids and other defects
    Audit,
    /// Place a new object centred at X,Y (plan percentages)
    #[command(allow_negative_numbers = true)]
    Add {
        /// Object kind: table, sunbed, workspace, boat, room or a custom label
        kind: String,
        x: f64,
        y: f64,
    },
    /// Move an object's centre to X,Y
    #[command(allow_negative_numbers = true)]
    Move { id: String, x: f64, y: f64 },
    /// Drag one corner of an object by DX,DY
    #[command(allow_negative_numbers = true)]
    Resize {
        id: String,
        /// top-left, top-right, bottom-left or bottom-right
        handle: Handle,
        dx: f64,
        dy: f64,
    },
    /// Edit object details
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        price: Option<f64>,
        #[arg(long, value_enum)]
        status: Option<StatusArg>,
        /// Hex color; an empty string clears it
        #[arg(long)]
        color: Option<String>,
    },
    /// Delete an object
    Delete { id: String },
    /// Remove every object from the floor
    Clear,
    /// Append an empty floor
    AddFloor { name: String },
    /// Delete a floor and its objects
    DeleteFloor { id: String },
}

#[derive(Clone, Copy, ValueEnum)]
enum StatusArg {
    Free,
    Reserved,
    Occupied,
}

impl From<StatusArg> for ObjectStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Free => ObjectStatus::Free,
            StatusArg::Reserved => ObjectStatus::Reserved,
            StatusArg::Occupied => ObjectStatus::Occupied,
        }
    }
}

/// Errors that can occur while running a command
#[derive(Debug, Error)]
enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Repository(#[from] RepositoryError),

    #[error("{0}")]
    Placement(#[from] PlacementError),

    #[error("location has no floors")]
    NoFloors,

    #[error("layout file '{0}' already exists")]
    AlreadyExists(PathBuf),
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "floor_placement=debug"
    } else {
        "floor_placement=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<i32, CliError> {
    let config = match &cli.config {
        Some(path) => PlacementConfig::from_file(path)?,
        None => PlacementConfig::default(),
    };
    let engine = PlacementEngine::new(config);

    let path = cli.layout;
    let floor_id = cli.floor;

    match cli.command {
        Command::Init { id, name } => {
            if path.exists() {
                return Err(CliError::AlreadyExists(path));
            }
            let mut location = Location::new(id, name);
            engine.add_floor(&mut location, "Main Floor")?;
            save(&path, &location)?;
            println!("Created {}", path.display());
            Ok(0)
        }
        Command::Show => {
            print_location(&read_location(&path)?);
            Ok(0)
        }
        Command::Audit => {
            let location = read_location(&path)?;
            let warnings = audit(&location, engine.config());
            if warnings.is_empty() {
                println!("No issues found");
                return Ok(0);
            }
            for warning in &warnings {
                println!("{}", warning);
            }
            Ok(1)
        }
        Command::Add { kind, x, y } => {
            let mut location = read_location(&path)?;
            let floor = target_floor(&mut location, floor_id.as_deref())?;
            let obj = engine.add_object(floor, ObjectKind::custom(&kind), Point::new(x, y))?;
            save(&path, &location)?;
            println!("Added {} ({})", obj.name, obj.id);
            Ok(0)
        }
        Command::Move { id, x, y } => {
            let mut location = read_location(&path)?;
            let floor = target_floor(&mut location, floor_id.as_deref())?;
            let obj = engine.move_object(floor, &id, Point::new(x, y))?;
            save(&path, &location)?;
            println!(
                "Moved {} to ({:.1}, {:.1})",
                obj.name, obj.position.x, obj.position.y
            );
            Ok(0)
        }
        Command::Resize { id, handle, dx, dy } => {
            let mut location = read_location(&path)?;
            let floor = target_floor(&mut location, floor_id.as_deref())?;
            let obj = engine.resize_object(floor, &id, handle, Delta::new(dx, dy))?;
            save(&path, &location)?;
            println!(
                "Resized {} to {:.1}x{:.1} at ({:.1}, {:.1})",
                obj.name, obj.width, obj.height, obj.position.x, obj.position.y
            );
            Ok(0)
        }
        Command::Update {
            id,
            name,
            description,
            price,
            status,
            color,
        } => {
            let mut patch = ObjectPatch::new();
            if let Some(name) = name {
                patch = patch.with_name(name);
            }
            if let Some(description) = description {
                patch = patch.with_description(description);
            }
            if let Some(price) = price {
                patch = patch.with_price(price);
            }
            if let Some(status) = status {
                patch = patch.with_status(status.into());
            }
            if let Some(color) = color {
                patch = patch.with_color(color);
            }
            let mut location = read_location(&path)?;
            let floor = target_floor(&mut location, floor_id.as_deref())?;
            let obj = engine.update_object(floor, &id, &patch)?;
            save(&path, &location)?;
            println!("Updated {} ({})", obj.name, obj.id);
            Ok(0)
        }
        Command::Delete { id } => {
            let mut location = read_location(&path)?;
            let floor = target_floor(&mut location, floor_id.as_deref())?;
            engine.delete_object(floor, &id)?;
            save(&path, &location)?;
            println!("Deleted {}", id);
            Ok(0)
        }
        Command::Clear => {
            let mut location = read_location(&path)?;
            let floor = target_floor(&mut location, floor_id.as_deref())?;
            let removed = engine.clear_floor(floor);
            save(&path, &location)?;
            println!("Removed {} object(s)", removed);
            Ok(0)
        }
        Command::AddFloor { name } => {
            let mut location = read_location(&path)?;
            let floor = engine.add_floor(&mut location, &name)?;
            save(&path, &location)?;
            println!("Added floor {} ({})", floor.name, floor.id);
            Ok(0)
        }
        Command::DeleteFloor { id } => {
            let mut location = read_location(&path)?;
            let floor = engine.delete_floor(&mut location, &id)?;
            save(&path, &location)?;
            println!(
                "Deleted floor {} with {} object(s)",
                floor.name,
                floor.objects.len()
            );
            Ok(0)
        }
    }
}

fn target_floor<'a>(
    location: &'a mut Location,
    floor_id: Option<&str>,
) -> Result<&'a mut Floor, CliError> {
    match floor_id {
        Some(id) => location
            .floor_mut(id)
            .ok_or_else(|| PlacementError::floor_not_found(id).into()),
        None => location.floors.first_mut().ok_or(CliError::NoFloors),
    }
}

fn save(path: &Path, location: &Location) -> Result<(), CliError> {
    write_location(path, location)?;
    info!(path = %path.display(), "layout written");
    Ok(())
}

fn print_location(location: &Location) {
    println!("{} ({})", location.name, location.id);
    for floor in &location.floors {
        println!(
            "  {} \"{}\" - {} object(s)",
            floor.id,
            floor.name,
            floor.objects.len()
        );
        for obj in &floor.objects {
            println!(
                "    {:<14} {:<18} {:<10} ({:>5.1}, {:>5.1}) {:>4.1}x{:<4.1} {:<8} {:.2}",
                obj.id,
                obj.name,
                obj.kind.tag(),
                obj.position.x,
                obj.position.y,
                obj.width,
                obj.height,
                obj.status.to_string(),
                obj.price
            );
        }
    }
}
