use crate::error::Error;
use crate::infrastructure;
use crate::runner::{Runnable, Runner};
use crate::stack::StackProps;
use eyre::Context;
use std::path::PathBuf;

#[derive(clap::Args, Clone)]
pub struct SynthCommand {
    /// Stack environment, e.g. prod or staging
    #[arg(short, long)]
    environment: Option<String>,

    /// Write the template to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl Runnable for SynthCommand {
    fn runner(&self) -> impl Runner {
        SynthRunner {
            command: self.clone(),
        }
    }
}

struct SynthRunner {
    command: SynthCommand,
}

impl Runner for SynthRunner {
    /// Synthesize the template without touching the AWS account
    async fn run(&mut self) -> Result<(), Error> {
        let environment = self
            .config()?
            .environment(self.command.environment.as_deref());

        let stack = infrastructure::stack(&environment, StackProps::default())?;

        let template = serde_json::to_string_pretty(&stack.template())
            .wrap_err("Failed to serialize template")?;

        match &self.command.output {
            Some(path) => {
                std::fs::write(path, format!("{template}\n"))
                    .wrap_err(format!("Failed to write template to {path:?}"))?;

                println!(
                    "{} {}",
                    console::style("Wrote").green().bold(),
                    path.display()
                );
            }

            None => println!("{template}"),
        }

        Ok(())
    }
}
