use agent::llm::{GenerationConfig, OpenAIConfig};
use agent::{Error, Result};
use clap::Parser;
use std::path::PathBuf;

const DEFAULT_MODEL: &str = "mistralai/Mixtral-8x7B-Instruct-v0.1";
const DEFAULT_API_BASE: &str = "https://router.huggingface.co/v1";

#[derive(Parser, Debug)]
#[command(name = "research-assistant", version)]
#[command(about = "Answer research questions with Wikipedia, web search and a hosted LLM")]
pub struct Args {
    /// Access token for the model endpoint
    #[arg(long, env = "HUGGINGFACEHUB_API_TOKEN", hide_env_values = true)]
    pub api_token: String,

    /// Model identifier sent with every request
    #[arg(long, env = "RESEARCH_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Base URL of the OpenAI-compatible chat completions API
    #[arg(long, env = "RESEARCH_API_BASE", default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    #[arg(long, env = "RESEARCH_TEMPERATURE", default_value_t = 0.2)]
    pub temperature: f32,

    /// Cap on generated tokens per answer
    #[arg(long, env = "RESEARCH_MAX_TOKENS", default_value_t = 2000)]
    pub max_tokens: u32,

    /// Maximum characters kept from the Wikipedia lookup
    #[arg(long, env = "RESEARCH_WIKIPEDIA_CHARS", default_value_t = 100)]
    pub wikipedia_chars: usize,

    /// Directory that saved research files are written to
    #[arg(long, env = "RESEARCH_OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,
}

impl Args {
    pub fn endpoint_config(&self) -> Result<OpenAIConfig> {
        if self.api_token.trim().is_empty() {
            return Err(Error::MissingArg(
                "HUGGINGFACEHUB_API_TOKEN must not be empty".to_string(),
            ));
        }

        Ok(OpenAIConfig::new()
            .with_api_base(&self.api_base)
            .with_api_key(&self.api_token))
    }

    pub fn generation_config(&self) -> GenerationConfig {
        GenerationConfig {
            temperature: Some(self.temperature),
            max_tokens: Some(self.max_tokens),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Args;
    use agent::Error;
    use clap::Parser;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["research-assistant", "--api-token", "hf_test"]);

        assert_eq!(args.model, "mistralai/Mixtral-8x7B-Instruct-v0.1");
        assert_eq!(args.temperature, 0.2);
        assert_eq!(args.max_tokens, 2000);
        assert_eq!(args.wikipedia_chars, 100);
        assert_eq!(args.output_dir, std::path::PathBuf::from("."));

        let generation = args.generation_config();
        assert_eq!(generation.temperature, Some(0.2));
        assert_eq!(generation.max_tokens, Some(2000));
        assert!(args.endpoint_config().is_ok());
    }

    #[test]
    fn test_blank_token_is_rejected() {
        let args = Args::parse_from(["research-assistant", "--api-token", "  "]);

        assert!(matches!(args.endpoint_config(), Err(Error::MissingArg(_))));
    }
}
