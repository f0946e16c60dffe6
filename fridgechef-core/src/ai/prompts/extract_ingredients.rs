//! Prompt templates for extracting ingredients from fridge photos.

pub const EXTRACT_PROMPT_NAME: &str = "extract_ingredients";

pub fn render_extract_system_prompt() -> String {
    r#"You are an ingredient detection assistant. You are given a photo of the inside of a refrigerator or of loose ingredients.

Identify every edible ingredient you can recognize in the photo and return JSON with this exact structure:
{
  "ingredients": [
    {
      "name": "ingredient name",
      "confidence": 0.0 to 1.0,
      "notes": "short note about quantity or condition (optional, null if nothing useful)"
    }
  ],
  "unsure_items": ["things that might be food but you cannot identify"],
  "spoiled_items": ["ingredients that look spoiled or past their best"]
}

Rules:
- Only list things that are actually edible ingredients; ignore containers, shelves and packaging
- Use a confidence between 0.0 and 1.0 reflecting how sure you are of each identification
- An empty ingredients list is a valid answer if nothing edible is visible
- Return ONLY the JSON, no other text"#
        .to_string()
}

pub fn render_extract_user_prompt() -> String {
    "Analyze this photo and list the edible ingredients you can see.".to_string()
}
