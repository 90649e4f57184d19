//! Blog-post workflow definitions.
//!
//! The canonical three-stage crew for producing a blog post: research, write,
//! edit. Each stage is a task bound to a role-specialized agent, and all
//! three agents share one model binding. Order is the sole dependency
//! mechanism; the executor feeds each stage's output forward.

use std::sync::Arc;

use crate::domain::{Agent, ModelBinding, Task};

/// Build the ordered research/write/edit task sequence for `topic`.
///
/// All tasks are constructed up front as immutable values; nothing is
/// injected into them after the fact.
pub fn blog_workflow(topic: &str, binding: Arc<ModelBinding>) -> Vec<Task> {
    let researcher = Arc::new(Agent::new(
        "Blog Research Specialist",
        "Research and gather comprehensive information about the given topic",
        "You are an expert researcher with a keen eye for detail and the ability to prepare \
         the most relevant and interesting information about any topic. You excel at organizing \
         information in a way that will be useful for writing engaging blog posts.",
        binding.clone(),
    ));

    let writer = Arc::new(Agent::new(
        "Professional Blog Writer",
        "Create engaging and well-structured blog posts",
        "You are a skilled blog writer known for creating compelling content that engages \
         readers while maintaining high standards of clarity and informativeness. You have a \
         talent for turning complex topics into accessible and interesting blog posts.",
        binding.clone(),
    ));

    let editor = Arc::new(Agent::new(
        "Content Editor",
        "Polish and refine blog content for maximum impact",
        "You are a meticulous editor with years of experience in digital content. You excel \
         at improving content structure, readability, and ensuring the final piece meets \
         high-quality standards while maintaining SEO best practices.",
        binding,
    ));

    vec![
        Task::new(
            &format!(
                "Research the topic: {topic}. Prepare key information, interesting facts, \
                 and relevant data. Limit to 200 words"
            ),
            "Detailed research notes and key points for the blog post",
            researcher,
        ),
        Task::new(
            &format!(
                "Write a comprehensive blog post about {topic} using the research provided. \
                 Create an engaging introduction, well-structured body with clear sections, \
                 and a compelling conclusion."
            ),
            "Complete first draft of the blog post",
            writer,
        ),
        Task::new(
            "Review and polish the blog post. Check for clarity, flow, and engagement. \
             Ensure proper structure, formatting, and optimal readability.",
            "Final, polished version of the blog post",
            editor,
        ),
    ]
}
