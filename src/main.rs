use anyhow::{bail, Context};
use room_timetable::config::Config;
use room_timetable::display::{print_grid, print_lists, write_grid_to_file};
use room_timetable::export::export_grid_to_csv;
use room_timetable::persistence::{DocumentStore, FileStore};
use room_timetable::{document, web, ListKind, Timetable};

fn print_usage() {
    println!("Usage:");
    println!("  room-timetable web [port]            serve the timetable API");
    println!("  room-timetable show [room] [file]    print (or write) saved timetables");
    println!("  room-timetable export <room> <file>  write one room as CSV");
    println!("  room-timetable check <file>          validate a timetable document");
    println!();
    println!("Environment: TIMETABLE_DATA (default data.json), TIMETABLE_STATIC, TIMETABLE_AUTOSAVE");
}

fn load_saved(config: &Config) -> anyhow::Result<Timetable> {
    let store = FileStore::new(&config.data_path);
    let json = store
        .load()
        .with_context(|| format!("reading {}", config.data_path.display()))?;
    Ok(match json {
        Some(json) => document::load_or_empty(&json),
        None => Timetable::new(),
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    let config = Config::from_env();

    match args.get(1).map(String::as_str) {
        Some("web") => {
            let config = config.with_port_arg(args.get(2).map(String::as_str));
            println!("Starting web server on port {}...", config.port);
            println!("Timetable data: {}", config.data_path.display());
            println!("Access the API at http://localhost:{}/api/schedule", config.port);
            web::start_server(config).await?;
        }
        Some("show") => {
            let timetable = load_saved(&config)?;
            print_lists(&timetable);
            println!();
            let room = args.get(2).map(String::as_str);
            if let Some(room) = room {
                if !timetable.list(ListKind::Rooms).contains(room) {
                    bail!("unknown room '{}'", room);
                }
            }
            match (room, args.get(3)) {
                (Some(room), Some(path)) => {
                    write_grid_to_file(&timetable, room, path)
                        .with_context(|| format!("writing {}", path))?;
                    println!("Timetable of {} saved to {}", room, path);
                }
                _ => print_grid(&timetable, room)?,
            }
        }
        Some("export") => {
            let (Some(room), Some(path)) = (args.get(2), args.get(3)) else {
                print_usage();
                bail!("export needs a room and an output file");
            };
            let timetable = load_saved(&config)?;
            if !timetable.list(ListKind::Rooms).contains(room) {
                bail!("unknown room '{}'", room);
            }
            export_grid_to_csv(&timetable, room, path)
                .map_err(|e| anyhow::anyhow!("{}", e))
                .with_context(|| format!("exporting {} to {}", room, path))?;
            println!("Timetable of {} saved to {}", room, path);
        }
        Some("check") => {
            let Some(path) = args.get(2) else {
                print_usage();
                bail!("check needs a file");
            };
            let json = std::fs::read_to_string(path).with_context(|| format!("reading {}", path))?;
            let timetable = document::parse(&json).with_context(|| format!("validating {}", path))?;
            println!("{} is valid", path);
            print_lists(&timetable);
        }
        _ => print_usage(),
    }

    Ok(())
}
