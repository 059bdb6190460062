use clap::{Parser, Subcommand};
use std::path::PathBuf;

use lifecycle_core::{Rect, Side, Size};

#[derive(Parser, Debug)]
#[clap(author, version, about = "SDLC & STLC organizer for the hotel reservation system")]
pub struct Cli {
    /// Alternative reference data file (YAML or JSON)
    #[clap(long, global = true)]
    pub data: Option<PathBuf>,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show both methodologies with their definitions
    Overview,

    /// List the phases of a methodology
    Phases {
        /// sdlc or stlc
        methodology: String,
    },

    /// Show one phase with its related phase and use case
    Show {
        /// sdlc or stlc
        methodology: String,

        /// Phase number, starting at 1
        number: usize,
    },

    /// Side-by-side comparison of SDLC and STLC phases
    Compare,

    /// List roles, or the requirements of one role
    Roles {
        /// Role key (e.g. huesped)
        key: Option<String>,
    },

    /// Suggested test cases for a requirement
    Tests {
        /// Requirement id (e.g. RF-02 or RNF-01)
        id: String,
    },

    /// List non-functional requirements
    Nfr,

    /// Validate cross references and keys of the reference data
    Check,

    /// Export the reference data
    Export {
        /// Output format (md, json, yaml)
        #[clap(long, short = 'f', default_value = "md")]
        format: String,

        /// Output file (defaults to organizer.<ext>)
        #[clap(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Compute where the phase popover would be placed
    Place {
        /// Trigger rectangle as left,top,width,height
        #[clap(long)]
        trigger: Rect,

        /// Container rectangle as left,top,width,height
        #[clap(long)]
        container: Rect,

        /// Viewport size as width,height
        #[clap(long)]
        viewport: Size,

        /// Force the overlay side (before or after)
        #[clap(long)]
        side: Option<Side>,

        /// Rendered overlay height, enables the boundary correction pass
        #[clap(long)]
        overlay_height: Option<f32>,
    },

    /// Browse phases, roles and requirements interactively
    Browse,
}
