//! Prompt template for meal calorie estimation

/// Worked examples embedded in every prompt: (meal description, answer)
pub const WORKED_EXAMPLES: &[(&str, u32)] = &[
    (
        "Boiled pork 500g, a plate of kimchi, perilla leaves, green chili, wasabi, beer 300cc",
        850,
    ),
    ("One whole fried chicken, cola 500ml", 1200),
    ("A bowl of rice, soybean paste stew, kimchi", 450),
];

/// Build the estimation prompt for a meal description
pub fn build_prompt(meal_description: &str) -> String {
    let mut prompt = String::from(
        "Calculate the total calories of the following meal as accurately as possible. \
         Return only the number (no unit, no decimal point, integer only).\n\n",
    );

    prompt.push_str("Meal: ");
    prompt.push_str(meal_description.trim());
    prompt.push_str("\n\nExamples:\n");

    for (meal, kcal) in WORKED_EXAMPLES {
        prompt.push_str(&format!("- \"{}\" → {}\n", meal, kcal));
    }

    prompt.push_str(
        "\nImportant: respond with digits only. Do not include any explanation or unit.",
    );
    prompt
}
