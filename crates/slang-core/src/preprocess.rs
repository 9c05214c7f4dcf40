use unicode_normalization::UnicodeNormalization;

pub trait Preprocessor {
    /// Clean user input before it reaches the store
    fn process(&self, text: &str) -> String {
        // A line break would split the entry across two lines of the working file
        text.replace(['\n', '\r'], " ").trim().to_string()
    }

    /// Comparison key for case-insensitive matching, never stored
    fn fold(&self, text: &str) -> String {
        text.nfkc().collect::<String>().to_lowercase()
    }
}

pub struct DefaultPreprocessor;
impl Preprocessor for DefaultPreprocessor {}
