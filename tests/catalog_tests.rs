//! End-to-end catalog tests against the flat-file store.

use std::fs;

use tempfile::TempDir;

use cookbook::{
    Catalog, CatalogError, Difficulty, DirStore, Ingredient, Recipe, RelatedLinks,
};

fn pancakes() -> Recipe {
    Recipe::builder("Puszyste placki z jabłkami")
        .ingredient(Ingredient::new("mąka pszenna", 150.0, "g").unwrap())
        .ingredient(Ingredient::new("zimne mleko", 200.0, "ml").unwrap())
        .ingredient(Ingredient::countable("jajko", 1.0).unwrap())
        .ingredient(Ingredient::new("cukier waniliowy", 1.0, "tsp").unwrap())
        .ingredient(Ingredient::countable("jabłko", 2.0).unwrap())
        .ingredient(Ingredient::new("olej", 100.0, "ml").unwrap())
        .paragraph("W misce wymieszaj mąkę, cukier, jajo i zimne mleko.")
        .paragraph("Jabłko obierz, pokrój w małe kawałki i wymieszaj z ciastem.")
        .paragraph("Placki smaż na rozgrzanej patelni z obu stron na złoty kolor.")
        .difficulty(Difficulty::Easy)
        .estimated_time(15)
        .related_link("https://www.przepisy.pl/przepis/puszyste-placki-z-jablkami")
        .build()
        .unwrap()
}

fn magic_cake() -> Recipe {
    Recipe::builder("Magiczne ciasto")
        .ingredient(Ingredient::countable("żółtka jajek", 3.0).unwrap())
        .ingredient(Ingredient::new("cukier", 90.0, "g").unwrap())
        .ingredient(Ingredient::new("masło", 90.0, "g").unwrap())
        .ingredient(Ingredient::new("mąka pszenna", 90.0, "g").unwrap())
        .ingredient(Ingredient::new("mleko", 375.0, "ml").unwrap())
        .description("Ubij żółtka z cukrem, dodaj masło, mąkę i mleko, upiecz.")
        .difficulty(Difficulty::Medium)
        .estimated_time(90)
        .related_links(RelatedLinks::Many(vec![
            "https://www.przepisy.pl/przepis/magiczne-ciasto".to_string(),
            "https://example.com/magic-cake".to_string(),
        ]))
        .build()
        .unwrap()
}

fn stew() -> Recipe {
    // No difficulty or time set
    Recipe::builder("Bigos domowy")
        .ingredient(Ingredient::new("kapusta kiszona", 500.0, "g").unwrap())
        .ingredient(Ingredient::new("kiełbasa", 300.0, "g").unwrap())
        .ingredient(Ingredient::new("grzyby suszone", 30.0, "g").unwrap())
        .ingredient(Ingredient::new("mąka pszenna", 20.0, "g").unwrap())
        .description("Duś wszystko razem przez kilka godzin.")
        .build()
        .unwrap()
}

#[test]
fn test_recipes_survive_reopen() {
    let tmp = TempDir::new().unwrap();

    {
        let store = DirStore::open(tmp.path()).unwrap();
        let mut catalog = Catalog::open(store).unwrap();
        catalog.add_recipe(pancakes()).unwrap();
        catalog.add_recipe(magic_cake()).unwrap();
    }

    let reopened = Catalog::open(DirStore::open(tmp.path()).unwrap()).unwrap();
    assert_eq!(reopened.len(), 2);
    assert!(reopened.recipes().contains(&pancakes()));
    assert!(reopened.recipes().contains(&magic_cake()));
}

#[test]
fn test_add_writes_compressed_name_file() {
    let tmp = TempDir::new().unwrap();
    let mut catalog = Catalog::open(DirStore::open(tmp.path()).unwrap()).unwrap();
    catalog.add_recipe(pancakes()).unwrap();
    assert!(tmp.path().join("PuPlZJa.json").exists());
}

#[test]
fn test_add_duplicate_conflicts() {
    let tmp = TempDir::new().unwrap();
    let mut catalog = Catalog::open(DirStore::open(tmp.path()).unwrap()).unwrap();
    catalog.add_recipe(pancakes()).unwrap();
    assert!(matches!(
        catalog.add_recipe(pancakes()),
        Err(CatalogError::DuplicateRecipe(_))
    ));
}

#[test]
fn test_remove_deletes_file_and_entry() {
    let tmp = TempDir::new().unwrap();
    let mut catalog = Catalog::open(DirStore::open(tmp.path()).unwrap()).unwrap();
    catalog.add_recipe(pancakes()).unwrap();
    catalog.add_recipe(stew()).unwrap();

    catalog.remove_recipe("Puszyste placki z jabłkami").unwrap();
    assert_eq!(catalog.len(), 1);
    assert!(!tmp.path().join("PuPlZJa.json").exists());
    assert!(tmp.path().join("BiDo.json").exists());
}

#[test]
fn test_update_persists_new_content() {
    let tmp = TempDir::new().unwrap();
    let mut catalog = Catalog::open(DirStore::open(tmp.path()).unwrap()).unwrap();
    catalog.add_recipe(stew()).unwrap();

    let revised = Recipe::builder("Bigos domowy")
        .ingredient(Ingredient::new("kapusta kiszona", 600.0, "g").unwrap())
        .ingredient(Ingredient::new("kiełbasa", 400.0, "g").unwrap())
        .description("Duś dłużej.")
        .difficulty(Difficulty::Hard)
        .build()
        .unwrap();
    catalog.update_recipe(revised.clone()).unwrap();

    let reopened = Catalog::open(DirStore::open(tmp.path()).unwrap()).unwrap();
    assert_eq!(reopened.len(), 1);
    assert_eq!(reopened.recipes()[0], revised);
}

#[test]
fn test_open_skips_unreadable_entries() {
    let tmp = TempDir::new().unwrap();

    {
        let mut catalog = Catalog::open(DirStore::open(tmp.path()).unwrap()).unwrap();
        catalog.add_recipe(pancakes()).unwrap();
    }
    fs::write(tmp.path().join("Broken.json"), "{ not json").unwrap();
    // Valid JSON but invalid recipe: only one ingredient
    fs::write(
        tmp.path().join("Thin.json"),
        r#"{"nameFull": "Herbata", "ingredients": [{"name": "woda", "measure": 250.0, "unit": "ml"}], "description": "Zalej."}"#,
    )
    .unwrap();

    let catalog = Catalog::open(DirStore::open(tmp.path()).unwrap()).unwrap();
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.recipes()[0].name_full(), "Puszyste placki z jabłkami");
}

#[test]
fn test_sort_nulls_last_in_both_directions() {
    let tmp = TempDir::new().unwrap();
    let mut catalog = Catalog::open(DirStore::open(tmp.path()).unwrap()).unwrap();
    catalog.add_recipe(magic_cake()).unwrap();
    catalog.add_recipe(stew()).unwrap(); // no estimated time
    catalog.add_recipe(pancakes()).unwrap();

    catalog.sort_by_estimated_time(false);
    let names: Vec<&str> = catalog.recipes().iter().map(|r| r.name_full()).collect();
    assert_eq!(
        names,
        ["Puszyste placki z jabłkami", "Magiczne ciasto", "Bigos domowy"]
    );

    catalog.sort_by_estimated_time(true);
    let names: Vec<&str> = catalog.recipes().iter().map(|r| r.name_full()).collect();
    assert_eq!(
        names,
        ["Magiczne ciasto", "Puszyste placki z jabłkami", "Bigos domowy"]
    );
}

#[test]
fn test_sort_by_difficulty() {
    let tmp = TempDir::new().unwrap();
    let mut catalog = Catalog::open(DirStore::open(tmp.path()).unwrap()).unwrap();
    catalog.add_recipe(magic_cake()).unwrap();
    catalog.add_recipe(pancakes()).unwrap();
    catalog.add_recipe(stew()).unwrap(); // no difficulty

    catalog.sort_by_difficulty(false);
    let names: Vec<&str> = catalog.recipes().iter().map(|r| r.name_full()).collect();
    assert_eq!(
        names,
        ["Puszyste placki z jabłkami", "Magiczne ciasto", "Bigos domowy"]
    );
}

#[test]
fn test_filter_by_ingredients_any_and_all() {
    let tmp = TempDir::new().unwrap();
    let mut catalog = Catalog::open(DirStore::open(tmp.path()).unwrap()).unwrap();
    catalog.add_recipe(pancakes()).unwrap();
    catalog.add_recipe(magic_cake()).unwrap();
    catalog.add_recipe(stew()).unwrap();

    // Any of the two ingredients
    let any = catalog
        .filter_by_ingredients(&["mąka pszenna", "cukier"], false)
        .unwrap();
    assert_eq!(any.len(), 3);

    // Both required
    let all = catalog
        .filter_by_ingredients(&["mąka pszenna", "cukier"], true)
        .unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].name_full(), "Magiczne ciasto");
}

#[test]
fn test_filter_by_name_phrases() {
    let tmp = TempDir::new().unwrap();
    let mut catalog = Catalog::open(DirStore::open(tmp.path()).unwrap()).unwrap();
    catalog.add_recipe(pancakes()).unwrap();
    catalog.add_recipe(magic_cake()).unwrap();
    catalog.add_recipe(stew()).unwrap();

    let matched = catalog
        .filter_by_name_phrases(&["ciasto", "placki"], false)
        .unwrap();
    let names: Vec<&str> = matched.iter().map(|r| r.name_full()).collect();
    assert_eq!(names, ["Puszyste placki z jabłkami", "Magiczne ciasto"]);

    let matched = catalog
        .filter_by_name_phrases(&["ciasto", "placki"], true)
        .unwrap();
    assert!(matched.is_empty());
}

#[test]
fn test_stored_file_is_canonical_wire_form() {
    let tmp = TempDir::new().unwrap();
    let mut catalog = Catalog::open(DirStore::open(tmp.path()).unwrap()).unwrap();
    catalog.add_recipe(stew()).unwrap();

    let content = fs::read_to_string(tmp.path().join("BiDo.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&content).unwrap();
    let object = value.as_object().unwrap();
    assert!(object.contains_key("nameFull"));
    assert!(object.contains_key("ingredients"));
    assert!(object.contains_key("description"));
    // Absent optionals are omitted, not written as null
    assert!(!object.contains_key("estimatedTime"));
    assert!(!object.contains_key("difficulty"));
    assert!(!object.contains_key("relatedLinks"));

    let first = &value["ingredients"][0];
    assert_eq!(first["name"], "kapusta kiszona");
    assert_eq!(first["measure"], 500.0);
    assert_eq!(first["unit"], "g");
}
