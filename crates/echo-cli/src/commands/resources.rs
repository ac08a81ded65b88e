use echo_core::safety::{crisis_resources, grounding_techniques};

pub fn run() {
    println!("If you're in crisis, please reach out:");
    for resource in crisis_resources() {
        println!("  {} - {}: {}", resource.name, resource.contact, resource.description);
    }
    println!();
    println!("Grounding techniques:");
    for technique in grounding_techniques() {
        println!("  {}: {}", technique.title, technique.description);
    }
}
