pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "munchmatch")]
#[command(about = "MunchMatch - Find recipes from a food photo or description", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "PORT")]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long, env = "HOST")]
        host: Option<String>,
    },

    /// Search a running server for recipes
    Search {
        /// Food photo (.jpg, .jpeg or .png)
        #[arg(short, long)]
        image: Option<PathBuf>,

        /// Free-text description of the food
        #[arg(short, long)]
        description: Option<String>,

        /// Number of recipes to recommend (1-12)
        #[arg(short, long)]
        num_recipes: Option<u32>,
    },
}
