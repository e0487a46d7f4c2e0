pub mod xml_loader;

pub use xml_loader::load_xml_text;
