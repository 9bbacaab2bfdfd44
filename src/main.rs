use clap::Parser;
use odyssey::cli::{
    console, handle_completions, handle_config_init, hello, log, monitor, send, Cli, Commands,
    ConfigCommands,
};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Monitor(args) => monitor::handle_monitor(&args).await,
        Commands::Console(args) => console::handle_console(&args).await,
        Commands::Send(args) => send::handle_send(&args).await.map(|msg| println!("{}", msg)),
        Commands::Log(args) => log::handle_log(&args).await.map(|out| println!("{}", out)),
        Commands::Hello(args) => hello::handle_hello(&args).await.map(|msg| println!("{}", msg)),
        Commands::Config(config_cmd) => match config_cmd {
            ConfigCommands::Init(args) => handle_config_init(&args),
        },
        Commands::Completions(args) => {
            handle_completions(&args);
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
