pub mod loaders;
pub mod question;
pub mod question_type;
pub mod report;

pub use loaders::load_xml_text;
pub use question::{MatchingPair, Payload, QuestionRecord};
pub use question_type::QuestionType;
pub use report::{ConversionReport, SkippedQuestion};
