use agent::tools::Tool;

type BoxedTool = Box<dyn Tool + Send + Sync>;

/// Collects context for a question from the encyclopedia and the web search
/// tool. Tool failures end up in the context text instead of failing the
/// question.
pub struct Gatherer {
    encyclopedia: BoxedTool,
    web_search: BoxedTool,
}

impl Gatherer {
    pub fn new(encyclopedia: BoxedTool, web_search: BoxedTool) -> Self {
        Self {
            encyclopedia,
            web_search,
        }
    }

    pub async fn gather(&self, question: &str) -> String {
        let mut collected = String::new();
        collected.push_str(&consult("Wikipedia", self.encyclopedia.as_ref(), question).await);
        collected.push_str(&consult("Web search", self.web_search.as_ref(), question).await);
        collected
    }
}

async fn consult(label: &str, tool: &(dyn Tool + Send + Sync), question: &str) -> String {
    match tool.run(question).await {
        Ok(result) => format!("{} says: {}\n", label, result),
        Err(e) => {
            tracing::warn!(tool = tool.name(), error = %e, "lookup failed");
            format!("{} didn't work: {}\n", label, e)
        }
    }
}
