/// A managed message queue
///
/// The name is the physical queue name as it appears in the AWS account.
#[derive(Clone, Debug)]
pub struct Queue {
    /// Identity of the queue within its declaration scope
    pub id: String,

    pub name: String,
}

impl Queue {
    pub fn new(id: &str, name: &str) -> Self {
        Queue {
            id: id.to_string(),
            name: name.to_string(),
        }
    }
}

/// A managed pub/sub notification topic
#[derive(Clone, Debug)]
pub struct Topic {
    /// Identity of the topic within its declaration scope
    pub id: String,

    pub name: String,
    pub display_name: String,
}

impl Topic {
    pub fn new(id: &str, name: &str, display_name: &str) -> Self {
        Topic {
            id: id.to_string(),
            name: name.to_string(),
            display_name: display_name.to_string(),
        }
    }
}

#[derive(Clone, Debug)]
pub enum Resource {
    Queue(Queue),
    Topic(Topic),
}

impl Resource {
    /// Identity of the resource within its declaration scope
    pub fn id(&self) -> &str {
        match self {
            Resource::Queue(queue) => &queue.id,
            Resource::Topic(topic) => &topic.id,
        }
    }
}

/// Replace any unwanted character in a resource id
/// with its uppercase-alpha counterpart
///
/// CloudFormation logical ids are restricted to alphanumeric characters.
pub fn escape_logical_id(id: &str) -> String {
    id.replace("@", "AT")
        .replace(".", "DOT")
        .replace("-", "HYPHEN")
        .replace("_", "UNDRSC")
}
