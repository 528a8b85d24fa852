use obsidian_recipe_import::extractors::{extract_recipe, MicroDataExtractor};
use obsidian_recipe_import::extractors::{Extractor, ParsingContext};
use obsidian_recipe_import::{recipe_to_markdown, resolve_title, FetchVariant};

const BANANA_BREAD: &str = r#"
<html>
<body>
<div id="easyrecipe-557-0" class="easyrecipe" itemscope itemtype="http://schema.org/Recipe">
    <div itemprop="name" class="ERSName">Mom's Famous Banana Bread</div>
    <div itemprop="keywords">banana, bread, sweet</div>
    <div class="ERSTimes">
        <time itemprop="prepTime" datetime="PT10M">10 mins</time>
        <time itemprop="cookTime" datetime="PT1H">1 hour</time>
        <time itemprop="totalTime" datetime="PT1H10M">1 hour 10 mins</time>
    </div>
    <div class="ERSServes">Serves: <span itemprop="recipeYield">12 servings</span></div>
    <ul>
        <li class="ingredient" itemprop="ingredients">5 Tablespoons Butter (room temperature)</li>
        <li class="ingredient" itemprop="ingredients">1 Cup White Sugar</li>
        <li class="ingredient" itemprop="ingredients">1 Large Egg</li>
    </ul>
    <ol>
        <li class="instruction" itemprop="recipeInstructions">Preheat oven to 350 degrees and heavily grease a 9 inch bread pan.</li>
        <li class="instruction" itemprop="recipeInstructions">Beat butter and sugar until light, fluffy and well blended.</li>
    </ol>
</div>
</body>
</html>
"#;

const URL: &str = "https://www.cookingdivine.com/recipes/banana-bread/";

#[test]
fn test_microdata_extraction() {
    let context = ParsingContext::new(URL, BANANA_BREAD);

    let recipe = MicroDataExtractor.parse(&context).expect("Failed to extract recipe");

    assert_eq!(recipe.name.as_deref(), Some("Mom's Famous Banana Bread"));
    assert_eq!(recipe.prep_time, Some(10));
    assert_eq!(recipe.cook_time, Some(60));
    assert_eq!(recipe.total_time, Some(70));
    assert_eq!(recipe.servings, Some(12));
    assert_eq!(recipe.ingredients.len(), 3);
    assert_eq!(recipe.sections[0].steps.len(), 2);
}

#[test]
fn test_microdata_is_used_without_json_ld() {
    let context = ParsingContext::new(URL, BANANA_BREAD);
    let scraped = extract_recipe(&context).unwrap();

    let mut recipe = FetchVariant::Flat.shape(scraped, URL);
    resolve_title(&mut recipe, URL);
    let markdown = recipe_to_markdown(&recipe);

    assert!(markdown.starts_with(&format!("---\naliases:\nsource: {URL}\ntags:\nrating: \n---\n")));
    assert!(markdown.contains("# Mom's Famous Banana Bread\n"));
    assert!(markdown.contains("- [ ] 5 Tablespoons Butter (room temperature)\n"));
    assert!(markdown.contains("1. Preheat oven to 350 degrees and heavily grease a 9 inch bread pan.\n"));
    assert!(markdown.contains("2. Beat butter and sugar until light, fluffy and well blended.\n"));
}

#[test]
fn test_microdata_is_used_when_json_ld_recipe_is_empty() {
    let stub = r#"<script type="application/ld+json">{"@type": "Recipe", "name": "Banana Bread"}</script>"#;
    let html = BANANA_BREAD.replacen("<body>", &format!("<head>{stub}</head><body>"), 1);
    let context = ParsingContext::new(URL, &html);

    let scraped = extract_recipe(&context).unwrap();

    assert_eq!(scraped.name.as_deref(), Some("Mom's Famous Banana Bread"));
    assert_eq!(scraped.ingredients.len(), 3);
    assert_eq!(scraped.sections[0].steps.len(), 2);
}
