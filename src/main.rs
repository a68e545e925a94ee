use clap::Parser;
use miette::Result;
use refinery::cli::{Cli, Commands};

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    // Without this, piping to `head`, `grep -q`, etc. causes a panic on broken pipe.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }

    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;

    match cli.command {
        Commands::List(args) => refinery::cli::commands::list::run(args, &global),
        Commands::Create(args) => refinery::cli::commands::create::run(args, &global),
        Commands::Info(args) => refinery::cli::commands::info::run(args, &global),
        Commands::Rows(args) => refinery::cli::commands::rows::run(args, &global),
        Commands::Facet(args) => refinery::cli::commands::facet::run(args, &global),
        Commands::Apply(args) => refinery::cli::commands::apply::run(args, &global),
        Commands::Export(args) => refinery::cli::commands::export::run(args, &global),
        Commands::Delete(args) => refinery::cli::commands::delete::run(args, &global),
        Commands::Download(args) => refinery::cli::commands::download::run(args, &global),
        Commands::Version(args) => refinery::cli::commands::version::run(args, &global),
        Commands::Completions(args) => refinery::cli::commands::completions::run(args),
    }
}
