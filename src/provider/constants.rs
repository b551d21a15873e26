pub mod groq {
    pub const DEFAULT_MODEL: &str = "llama3-70b-8192";
    pub const API_BASE: &str = "https://api.groq.com/openai/v1";
    pub const CHAT_COMPLETIONS_ENDPOINT: &str = "/chat/completions";
    pub const API_KEY_ENV_VAR: &str = "GROQ_API_KEY";
}

pub mod openai {
    pub const DEFAULT_IMAGE_MODEL: &str = "dall-e-3";
    pub const DEFAULT_IMAGE_SIZE: &str = "1024x1024";
    pub const API_BASE: &str = "https://api.openai.com/v1";
    pub const IMAGES_ENDPOINT: &str = "/images/generations";
    pub const API_KEY_ENV_VAR: &str = "OPENAI_API_KEY";
}
