use crate::resource::{Queue, Resource, Topic};
use crate::stack::{Stack, StackProps};

/// Messaging resources of the Spring Cloud AWS sample applications
///
/// Queue names are derived from the stack id, so several environments can
/// share one account. The topic name is a literal: every environment points
/// at the same topic, and deploying two stacks in one account conflicts on
/// it. The deployed samples rely on that exact name, so it stays.
pub fn declare(stack: &mut Stack) -> eyre::Result<()> {
    let id = stack.id().to_string();

    stack.add(Resource::Queue(Queue::new(
        "aws-pojo",
        &format!("{id}-aws-pojo"),
    )))?;

    stack.add(Resource::Topic(Topic::new(
        "snsSpring",
        "snsSpring",
        "Spring cloud AWS SNS sample",
    )))?;

    stack.add(Resource::Queue(Queue::new(
        "spring-aws",
        &format!("{id}-spring-aws"),
    )))?;

    Ok(())
}

/// Build the messaging stack for an environment
pub fn stack(id: &str, props: StackProps) -> eyre::Result<Stack> {
    let mut stack = Stack::new(id, props);
    declare(&mut stack)?;
    Ok(stack)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn queue_names(stack: &Stack) -> Vec<String> {
        let template = stack.template();
        let resources = template.get("Resources").unwrap().as_object().unwrap();

        let mut names = resources
            .values()
            .filter(|r| r.get("Type").unwrap() == "AWS::SQS::Queue")
            .map(|r| {
                r.get("Properties")
                    .and_then(|p| p.get("QueueName"))
                    .and_then(Value::as_str)
                    .unwrap()
                    .to_string()
            })
            .collect::<Vec<String>>();

        names.sort();
        names
    }

    fn topic_properties(stack: &Stack) -> (String, String) {
        let template = stack.template();
        let resources = template.get("Resources").unwrap().as_object().unwrap();

        let topic = resources
            .values()
            .find(|r| r.get("Type").unwrap() == "AWS::SNS::Topic")
            .unwrap();

        let properties = topic.get("Properties").unwrap();

        (
            properties.get("TopicName").unwrap().as_str().unwrap().to_string(),
            properties
                .get("DisplayName")
                .unwrap()
                .as_str()
                .unwrap()
                .to_string(),
        )
    }

    #[test]
    fn queue_names_derive_from_the_stack_id() {
        let stack = stack("test", StackProps::default()).unwrap();

        assert_eq!(queue_names(&stack), vec!["test-aws-pojo", "test-spring-aws"]);
    }

    #[test]
    fn topic_names_are_fixed() {
        for id in ["test", "another"] {
            let stack = stack(id, StackProps::default()).unwrap();

            assert_eq!(
                topic_properties(&stack),
                (
                    "snsSpring".to_string(),
                    "Spring cloud AWS SNS sample".to_string()
                )
            );
        }
    }

    /// Two environments get disjoint queues but one shared topic name
    ///
    /// The shared name is inherited behavior the samples depend on. This test
    /// fails loudly if someone derives the topic name from the stack id.
    #[test]
    fn environments_collide_on_the_topic_name() {
        let prod = stack("prod", StackProps::default()).unwrap();
        let staging = stack("staging", StackProps::default()).unwrap();

        let prod_queues = queue_names(&prod);
        let staging_queues = queue_names(&staging);
        assert!(prod_queues.iter().all(|n| !staging_queues.contains(n)));

        assert_eq!(topic_properties(&prod), topic_properties(&staging));
    }

    #[test]
    fn redeclaring_into_the_same_scope_fails() {
        let mut scope = stack("test", StackProps::default()).unwrap();

        assert!(declare(&mut scope).is_err());
    }

    #[test]
    fn declaration_is_the_only_side_effect() {
        let stack = stack("test", StackProps::default()).unwrap();

        assert_eq!(stack.resources().len(), 3);
        assert_eq!(stack.template(), stack.template());
    }
}
