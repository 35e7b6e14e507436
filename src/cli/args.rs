use crate::cli::dispatcher::lift_global_flags;
use crate::error::Result;
use crate::project_identity;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "mnqnctl",
    about = "Build and deploy local microservices into Kubernetes",
    long_about = "mnqnctl makes local development of microservices within k8s simple",
    version,
    disable_help_subcommand = true,
    next_line_help = false,
    term_width = 80
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalFlags,

    /// Command path and its arguments, e.g. `deploy latest`
    #[arg(
        value_name = "COMMAND",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub words: Vec<String>,
}

impl Cli {
    /// Move global flags that follow the command into `global`.
    pub fn normalized(mut self) -> Result<Self> {
        self.words = lift_global_flags(&mut self.global, &self.words)?;
        Ok(self)
    }
}

#[derive(Parser, Debug)]
pub struct GlobalFlags {
    /// Verbose output
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Quiet mode
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(short = 'y', long = "yes")]
    pub yes: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Kubernetes context to deploy into
    #[arg(long, value_name = "NAME", default_value = project_identity::DEFAULT_KUBE_CONTEXT)]
    pub kube_context: String,
}
