// reset; cargo run -- convert --excel-file ./data/Stock_List_Mar2025.xlsx
// reset; cargo run -- serve --port 5000

use catalog_importer::{
    config::{ConvertArgs, ServerConfig},
    convert::run_convert,
    logging::init_tracing,
    server::serve,
};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "catalog-importer")]
#[command(about = "Maps catalog spreadsheets onto a fixed five-column CSV export")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert a local Excel file and write processed_<name>.csv
    Convert(ConvertArgs),
    /// Run the HTTP upload service
    Serve(ServerConfig),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Convert(args) => match run_convert(&args) {
            Ok(csv_path) => {
                println!("✅ CSV file created: {}", csv_path.display());
            }
            Err(e) => {
                catalog_lib::utils::write_error_to_log(
                    std::path::Path::new(catalog_lib::ERRORS_LOG_FILE),
                    "Conversion Error",
                    &format!("{}: {e:#}", args.excel_file.display()),
                );
                eprintln!("❌ Conversion failed with error: {e:#}");
                eprintln!("❌ Check {} for details.", catalog_lib::ERRORS_LOG_FILE);
                std::process::exit(1);
            }
        },
        Command::Serve(config) => serve(config).await?,
    }

    Ok(())
}
