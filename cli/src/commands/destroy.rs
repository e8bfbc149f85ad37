use crate::deploy::Deployment;
use crate::error::Error;
use crate::infrastructure;
use crate::runner::{Runnable, Runner};
use crate::stack::StackProps;

#[derive(clap::Args, Clone)]
pub struct DestroyCommand {
    /// Stack environment, e.g. prod or staging
    #[arg(short, long)]
    environment: Option<String>,
}

impl Runnable for DestroyCommand {
    fn runner(&self) -> impl Runner {
        DestroyRunner {
            command: self.clone(),
        }
    }
}

struct DestroyRunner {
    command: DestroyCommand,
}

impl Runner for DestroyRunner {
    /// Request deletion, the engine tears the resources down asynchronously
    async fn run(&mut self) -> Result<(), Error> {
        let environment = self
            .config()?
            .environment(self.command.environment.as_deref());

        let stack = infrastructure::stack(&environment, StackProps::default())?;

        Deployment::new(&stack).await?.destroy().await?;

        println!(
            "{} {}",
            console::style("Destroy requested for").green().bold(),
            console::style(&environment).bold()
        );

        Ok(())
    }
}
