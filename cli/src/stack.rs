use crate::resource::{escape_logical_id, Resource};
use serde_json::{json, Value};

/// Deployment options recognized by the provisioning engine
///
/// Only the template description is configurable. Everything else the engine
/// accepts is left at its defaults.
#[derive(Clone, Debug, Default)]
pub struct StackProps {
    pub description: Option<String>,
}

/// A rendered resource, ready to be inserted into the template
#[derive(Clone, Debug)]
pub struct CfnResource {
    logical_id: String,
    body: Value,
}

impl CfnResource {
    pub fn logical_id(&self) -> &str {
        &self.logical_id
    }
}

/// Declaration scope for managed resources
///
/// Accumulates rendered resources in an explicit list and synthesizes them
/// into a CloudFormation template. Logical ids are unique within one scope,
/// the same rule the engine applies to a deployed stack.
#[derive(Clone, Debug)]
pub struct Stack {
    id: String,
    props: StackProps,
    resources: Vec<CfnResource>,
}

impl Stack {
    pub fn new(id: &str, props: StackProps) -> Self {
        Stack {
            id: id.to_string(),
            props,
            resources: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Render a resource descriptor into its CFN form
    fn render(resource: &Resource) -> CfnResource {
        match resource {
            Resource::Queue(queue) => CfnResource {
                logical_id: format!("Queue{}", escape_logical_id(&queue.id)),
                body: json!({
                    "Type": "AWS::SQS::Queue",
                    "Properties": {
                        "QueueName": queue.name,
                    }
                }),
            },

            Resource::Topic(topic) => CfnResource {
                logical_id: format!("Topic{}", escape_logical_id(&topic.id)),
                body: json!({
                    "Type": "AWS::SNS::Topic",
                    "Properties": {
                        "TopicName": topic.name,
                        "DisplayName": topic.display_name,
                    }
                }),
            },
        }
    }

    /// Add a resource to the scope
    ///
    /// Fails on a duplicate logical id. The engine rejects such templates
    /// anyway, and failing here points at the offending declaration instead
    /// of a deploy-time diagnostic.
    pub fn add(&mut self, resource: Resource) -> eyre::Result<()> {
        let rendered = Self::render(&resource);

        if self
            .resources
            .iter()
            .any(|existing| existing.logical_id == rendered.logical_id)
        {
            return Err(eyre::eyre!(
                "Resource \"{}\" is already declared in stack \"{}\"",
                resource.id(),
                self.id,
            ));
        }

        self.resources.push(rendered);
        Ok(())
    }

    pub fn resources(&self) -> &[CfnResource] {
        &self.resources
    }

    /// Synthesize the CFN template
    pub fn template(&self) -> Value {
        let resources = self
            .resources
            .iter()
            .map(|r| (r.logical_id.clone(), r.body.clone()))
            .collect::<serde_json::Map<String, Value>>();

        let mut template = json!({
            "AWSTemplateFormatVersion": "2010-09-09",
            "Resources": resources,
        });

        if let Some(description) = &self.props.description {
            template
                .as_object_mut()
                .unwrap()
                .insert("Description".to_string(), json!(description));
        }

        template
    }
}

impl std::fmt::Display for Stack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.template())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::{Queue, Topic};

    #[test]
    fn empty_stack_has_no_resources() {
        let stack = Stack::new("test", StackProps::default());

        assert_eq!(
            stack.template(),
            json!({
                "AWSTemplateFormatVersion": "2010-09-09",
                "Resources": {},
            })
        );
    }

    #[test]
    fn renders_queue_and_topic() {
        let mut stack = Stack::new("test", StackProps::default());
        stack
            .add(Resource::Queue(Queue::new("inbox", "test-inbox")))
            .unwrap();
        stack
            .add(Resource::Topic(Topic::new("alerts", "alerts", "Alerts")))
            .unwrap();

        let template = stack.template();
        let resources = template.get("Resources").unwrap();

        assert_eq!(
            resources.get("Queueinbox").unwrap(),
            &json!({
                "Type": "AWS::SQS::Queue",
                "Properties": {"QueueName": "test-inbox"}
            })
        );

        assert_eq!(
            resources.get("Topicalerts").unwrap(),
            &json!({
                "Type": "AWS::SNS::Topic",
                "Properties": {"TopicName": "alerts", "DisplayName": "Alerts"}
            })
        );
    }

    #[test]
    fn rejects_duplicate_logical_ids() {
        let mut stack = Stack::new("test", StackProps::default());
        stack
            .add(Resource::Queue(Queue::new("inbox", "test-inbox")))
            .unwrap();

        let duplicate = stack.add(Resource::Queue(Queue::new("inbox", "other-name")));
        assert!(duplicate.is_err());
        assert_eq!(stack.resources().len(), 1);
    }

    #[test]
    fn description_is_optional() {
        let stack = Stack::new(
            "test",
            StackProps {
                description: Some("Messaging resources".to_string()),
            },
        );

        assert_eq!(
            stack.template().get("Description").unwrap(),
            &json!("Messaging resources")
        );
        assert!(Stack::new("test", StackProps::default())
            .template()
            .get("Description")
            .is_none());
    }
}
