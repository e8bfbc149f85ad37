use crate::stack::Stack;
use aws_config::BehaviorVersion;
use eyre::WrapErr;

/// State of the latest operation on a deployed stack
#[derive(Clone, Debug, PartialEq)]
pub enum Status {
    InProgress,
    Complete,
    Failed(Vec<String>),
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::InProgress => write!(f, "IN_PROGRESS"),
            Status::Complete => write!(f, "COMPLETE"),
            Status::Failed(_) => write!(f, "FAILED"),
        }
    }
}

/// A stack event reduced to the fields the classification needs
#[derive(Clone, Debug)]
pub(crate) struct Event {
    pub(crate) resource_type: String,
    pub(crate) status: String,
    pub(crate) reason: Option<String>,
}

impl Event {
    fn is_stack(&self) -> bool {
        self.resource_type == "AWS::CloudFormation::Stack"
    }
}

/// Classify the events of the latest stack operation
///
/// Expects events newest first, truncated at the operation start marker.
pub(crate) fn classify(events: &[Event]) -> Status {
    let terminal = events.iter().find(|event| {
        event.is_stack()
            && matches!(
                event.status.as_str(),
                "CREATE_COMPLETE"
                    | "UPDATE_COMPLETE"
                    | "DELETE_COMPLETE"
                    | "CREATE_FAILED"
                    | "UPDATE_FAILED"
                    | "DELETE_FAILED"
                    | "UPDATE_ROLLBACK_COMPLETE"
                    | "UPDATE_ROLLBACK_FAILED"
                    | "ROLLBACK_COMPLETE"
                    | "ROLLBACK_FAILED"
            )
    });

    let Some(terminal) = terminal else {
        return Status::InProgress;
    };

    if terminal.status.ends_with("_COMPLETE") && !terminal.status.contains("ROLLBACK") {
        return Status::Complete;
    }

    // Collect the reasons of failed resources, the stack-level event only
    // repeats them in aggregate
    let errors = events
        .iter()
        .filter(|event| !event.is_stack() && event.status.contains("FAILED"))
        .filter_map(|event| event.reason.clone())
        .collect();

    Status::Failed(errors)
}

/// A synthesized stack bound to the CloudFormation client
///
/// All operations here delegate to CloudFormation. Conflicting physical
/// names, invalid characters, and quota limits are its diagnostics, not ours.
pub struct Deployment {
    client: aws_sdk_cloudformation::Client,
    name: String,
    template: String,
}

impl Deployment {
    pub async fn new(stack: &Stack) -> eyre::Result<Self> {
        let config = aws_config::defaults(BehaviorVersion::v2025_01_17())
            .load()
            .await;

        Ok(Deployment {
            client: aws_sdk_cloudformation::Client::new(&config),
            name: stack.id().to_string(),
            template: serde_json::to_string_pretty(&stack.template())
                .wrap_err("Failed to serialize template")?,
        })
    }

    /// Check if the stack already exists
    async fn is_exists(&self) -> eyre::Result<bool> {
        let result = self
            .client
            .describe_stacks()
            .set_stack_name(Some(self.name.clone()))
            .send()
            .await;

        if let Err(e) = &result {
            if let aws_sdk_cloudformation::error::SdkError::ServiceError(err) = e {
                if err.err().meta().code() == Some("ValidationError") {
                    return Ok(false);
                } else {
                    return Err(eyre::eyre!(
                        "Service error while describing stack: {:?}",
                        err
                    ));
                }
            } else {
                return Err(eyre::eyre!("Failed to describe stack: {:?}", e));
            }
        }

        Ok(true)
    }

    /// Provision the template in CloudFormation
    pub async fn provision(&self) -> eyre::Result<()> {
        log::debug!("Provisioning template:\n{}", self.template);

        if self.is_exists().await? {
            self.client
                .update_stack()
                .stack_name(&self.name)
                .template_body(&self.template)
                .send()
                .await
                .wrap_err("Failed to update stack")?;
        } else {
            self.client
                .create_stack()
                .stack_name(&self.name)
                .template_body(&self.template)
                .send()
                .await
                .wrap_err("Failed to create stack")?;
        }

        Ok(())
    }

    /// Delete the deployed stack
    pub async fn destroy(&self) -> eyre::Result<()> {
        self.client
            .delete_stack()
            .stack_name(&self.name)
            .send()
            .await
            .wrap_err("Failed to delete stack")?;

        Ok(())
    }

    /// Status of the latest operation on the deployed stack
    pub async fn status(&self) -> eyre::Result<Status> {
        let mut next_token = None;
        let mut events = Vec::new();

        'pages: loop {
            let mut request = self.client.describe_stack_events().stack_name(&self.name);

            if let Some(token) = next_token {
                request = request.next_token(token);
            }

            let response = request
                .send()
                .await
                .wrap_err("Failed to describe stack events")?;

            // Events come newest first. The "User Initiated" stack event
            // marks the start of the latest operation, everything past it
            // belongs to a previous one.
            for event in response.stack_events() {
                let mapped = Event {
                    resource_type: event.resource_type().unwrap_or_default().to_string(),
                    status: event
                        .resource_status()
                        .map(|status| status.as_str().to_string())
                        .unwrap_or_default(),
                    reason: event.resource_status_reason().map(|r| r.to_string()),
                };

                if mapped.is_stack() && mapped.reason.as_deref() == Some("User Initiated") {
                    break 'pages;
                }

                events.push(mapped);
            }

            next_token = response.next_token().map(|s| s.to_string());

            if next_token.is_none() {
                break;
            }
        }

        Ok(classify(&events))
    }
}
