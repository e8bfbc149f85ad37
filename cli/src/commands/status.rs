use crate::deploy::{Deployment, Status};
use crate::error::Error;
use crate::infrastructure;
use crate::runner::{Runnable, Runner};
use crate::stack::StackProps;

#[derive(clap::Args, Clone)]
pub struct StatusCommand {
    /// Stack environment, e.g. prod or staging
    #[arg(short, long)]
    environment: Option<String>,
}

impl Runnable for StatusCommand {
    fn runner(&self) -> impl Runner {
        StatusRunner {
            command: self.clone(),
        }
    }
}

struct StatusRunner {
    command: StatusCommand,
}

impl Runner for StatusRunner {
    /// Display the state of the latest operation on the stack
    async fn run(&mut self) -> Result<(), Error> {
        let environment = self
            .config()?
            .environment(self.command.environment.as_deref());

        let stack = infrastructure::stack(&environment, StackProps::default())?;
        let status = Deployment::new(&stack).await?.status().await?;

        match &status {
            Status::Complete => println!("{}", console::style(&status).green().bold()),

            Status::InProgress => println!("{}", console::style(&status).yellow().bold()),

            Status::Failed(errors) => {
                println!("{}", console::style(&status).red().bold());

                for error in errors {
                    println!("{}", console::style(error).dim());
                }
            }
        }

        Ok(())
    }
}
