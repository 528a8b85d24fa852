use obsidian_recipe_import::{
    get_recipe, recipe_to_markdown, Directions, FetchVariant, ImportConfig, ImportError,
    IngredientEntry, Ingredients, Recipe, WebFetcher,
};

fn create_recipe_html(json_ld: &str) -> String {
    format!(
        r#"
        <!DOCTYPE html>
        <html>
        <head>
            <title>Recipe Page</title>
            <script type="application/ld+json">
                {json_ld}
            </script>
        </head>
        <body>
            <h1>Recipe</h1>
        </body>
        </html>
        "#
    )
}

fn fetch(
    server: &mut mockito::Server,
    path: &str,
    body: String,
    variant: FetchVariant,
) -> Result<Recipe, ImportError> {
    let _m = server
        .mock("GET", path)
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body(body)
        .create();

    let url = format!("{}{}", server.url(), path);
    let fetcher = WebFetcher::new(&ImportConfig::default(), variant)?;
    get_recipe(&fetcher, &url)
}

#[test]
fn test_recipe_without_instructions() {
    let mut server = mockito::Server::new();
    let json_ld = r#"
    {
        "@context": "https://schema.org/",
        "@type": "Recipe",
        "name": "Dishoom's House Black Daal",
        "cookTime": "PT5H",
        "prepTime": "PT15M",
        "totalTime": "PT5H30M",
        "recipeIngredient": [
            "300g whole black urad daal",
            "⅔ tsp deggi mirch chilli powder",
            "90ml double cream"
        ],
        "recipeYield": 8
    }
    "#;

    let recipe = fetch(&mut server, "/daal", create_recipe_html(json_ld), FetchVariant::Flat).unwrap();

    assert_eq!(recipe.title.as_deref(), Some("Dishoom's House Black Daal"));
    assert_eq!(recipe.servings, Some(8));
    assert_eq!(recipe.prep_time, Some(15));
    assert_eq!(recipe.cook_time, Some(300));
    assert_eq!(recipe.total_time, Some(330));
    assert_eq!(recipe.ingredients.len(), 3);
    assert_eq!(recipe.directions, Directions::Steps(Vec::new()));

    let markdown = recipe_to_markdown(&recipe);
    assert!(markdown.contains("Servings: 8\nPrep Time: 15\nCook Time: 300\nTotal Time: 330\n"));
    assert!(markdown.ends_with("## Directions\n\n"));
}

#[test]
fn test_missing_name_falls_back_to_url() {
    let mut server = mockito::Server::new();
    let json_ld = r#"
    {
        "@type": "Recipe",
        "recipeIngredient": ["salt", "pepper"],
        "recipeInstructions": ["Mix.", "Bake."]
    }
    "#;

    let recipe = fetch(
        &mut server,
        "/recipes/creamy-garlic-chicken/",
        create_recipe_html(json_ld),
        FetchVariant::Flat,
    )
    .unwrap();

    assert_eq!(recipe.title.as_deref(), Some("Creamy Garlic Chicken"));
    let markdown = recipe_to_markdown(&recipe);
    assert!(markdown.contains("\n# Creamy Garlic Chicken\n"));
    assert!(markdown.contains(&format!("\nsource: {}/recipes/creamy-garlic-chicken/\n", server.url())));
}

#[test]
fn test_empty_strings_and_zero_values() {
    let mut server = mockito::Server::new();
    let json_ld = r#"
    {
        "@type": "Recipe",
        "name": "Toast",
        "prepTime": "PT0M",
        "cookTime": "",
        "recipeYield": "",
        "keywords": "",
        "recipeIngredient": ["bread", "", "  "],
        "recipeInstructions": [{"@type": "HowToStep", "text": ""}, {"@type": "HowToStep", "text": "Toast it."}]
    }
    "#;

    let recipe = fetch(&mut server, "/toast", create_recipe_html(json_ld), FetchVariant::Structured).unwrap();

    assert_eq!(recipe.prep_time, Some(0));
    assert_eq!(recipe.cook_time, None);
    assert_eq!(recipe.servings, None);
    assert_eq!(recipe.tags, Some(Vec::new()));
    assert_eq!(
        recipe.ingredients,
        Ingredients::Structured(vec![IngredientEntry::new("bread", None)])
    );

    let markdown = recipe_to_markdown(&recipe);
    assert!(!markdown.contains("Prep Time"));
    assert!(!markdown.contains("Servings"));
    assert!(markdown.contains("\ntags:\n"));
    assert!(markdown.contains("## Directions\n- Toast it.\n"));
}

#[test]
fn test_recipe_yield_variations() {
    let cases = [
        (r#""recipeYield": 4"#, Some(4)),
        (r#""recipeYield": "6 servings""#, Some(6)),
        (r#""recipeYield": ["2", "2 loaves"]"#, Some(2)),
        (r#""recipeYield": "Serves 10""#, Some(10)),
        (r#""recipeYield": "a crowd""#, None),
    ];

    for (index, (field, expected)) in cases.into_iter().enumerate() {
        let mut server = mockito::Server::new();
        let json_ld = format!(r#"{{"@type": "Recipe", "name": "Yield", "recipeIngredient": ["rice"], {field}}}"#);
        let recipe = fetch(
            &mut server,
            &format!("/yield-{index}"),
            create_recipe_html(&json_ld),
            FetchVariant::Flat,
        )
        .unwrap();
        assert_eq!(recipe.servings, expected, "case {field}");
    }
}

#[test]
fn test_lowercase_recipe_type_in_graph() {
    let mut server = mockito::Server::new();
    let json_ld = r#"
    {
        "@context": "https://schema.org",
        "@graph": [
            {"@type": "webpage", "name": "Page"},
            {"@type": "recipe", "name": "Graph Recipe", "recipeIngredient": ["1 cup rice"]}
        ]
    }
    "#;

    let recipe = fetch(&mut server, "/graph", create_recipe_html(json_ld), FetchVariant::Flat).unwrap();

    assert_eq!(recipe.title.as_deref(), Some("Graph Recipe"));
    assert_eq!(recipe.ingredients, Ingredients::Plain(vec!["1 cup rice".to_string()]));
}

#[test]
fn test_rating_and_tags() {
    let mut server = mockito::Server::new();
    let json_ld = r#"
    {
        "@type": "Recipe",
        "name": "Chili",
        "aggregateRating": {"@type": "AggregateRating", "ratingValue": "4.5", "reviewCount": "812"},
        "keywords": ["Main Course", "Slow Cooker", "Beef"],
        "recipeIngredient": ["1 lb ground beef"]
    }
    "#;

    let structured = fetch(&mut server, "/chili", create_recipe_html(json_ld), FetchVariant::Structured).unwrap();
    let markdown = recipe_to_markdown(&structured);
    assert!(markdown.contains("\ntags: main-course, slow-cooker, beef\nrating: 4.5\n"));

    let flat = fetch(&mut server, "/chili-flat", create_recipe_html(json_ld), FetchVariant::Flat).unwrap();
    let markdown = recipe_to_markdown(&flat);
    assert!(markdown.contains("\ntags:\nrating: 4.5\n"));
}

#[test]
fn test_recipe_stub_without_content() {
    let mut server = mockito::Server::new();
    let json_ld = r#"{"@type": "Recipe", "name": "Coming Soon"}"#;

    let err = fetch(&mut server, "/stub", create_recipe_html(json_ld), FetchVariant::Structured).unwrap_err();

    assert!(matches!(err, ImportError::NoRecipeFound(_)));
}

#[test]
fn test_page_without_recipe() {
    let mut server = mockito::Server::new();
    let html = "<html><body><p>Just a blog post.</p></body></html>".to_string();

    let err = fetch(&mut server, "/blog", html, FetchVariant::Flat).unwrap_err();

    assert!(matches!(err, ImportError::NoRecipeFound(_)));
}

#[test]
fn test_http_error_status() {
    let mut server = mockito::Server::new();
    let _m = server.mock("GET", "/missing").with_status(404).create();

    let url = format!("{}/missing", server.url());
    let fetcher = WebFetcher::new(&ImportConfig::default(), FetchVariant::Flat).unwrap();
    let err = get_recipe(&fetcher, &url).unwrap_err();

    match err {
        ImportError::HttpStatus { status, .. } => assert_eq!(status.as_u16(), 404),
        other => panic!("expected HttpStatus, got {other:?}"),
    }
}
