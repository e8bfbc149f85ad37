pub mod deploy;
pub mod destroy;
pub mod status;
pub mod synth;
use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Synthesize the CloudFormation template
    Synth(synth::SynthCommand),

    /// Deploy the messaging stack
    Deploy(deploy::DeployCommand),

    /// Delete the deployed stack
    Destroy(destroy::DestroyCommand),

    /// State of the latest stack operation
    Status(status::StatusCommand),
}
