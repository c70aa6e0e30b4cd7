//! Integration tests for the content repositories.
//!
//! Exercises the repository layer against a real database:
//! - Category/article create, update, and the `ON DELETE SET NULL` link
//! - Publishing rules and published-only reads
//! - Project images cascade and ordering
//! - Unique constraint violations
//! - Price list ordering

use assert_matches::assert_matches;
use pondasi_db::models::article::{ArticleFilter, NewArticle, UpdateArticle};
use pondasi_db::models::category::CreateCategory;
use pondasi_db::models::price::{CreateAsphaltPrice, CreateConcretePrice, UpdateAsphaltPrice};
use pondasi_db::models::project::{CreateProject, CreateProjectImage};
use pondasi_db::repositories::{
    ArticleRepo, AsphaltPriceRepo, CategoryRepo, ConcretePriceRepo, ProjectImageRepo, ProjectRepo,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_category(name: &str) -> CreateCategory {
    CreateCategory {
        name: name.to_string(),
        slug: None,
        description: None,
    }
}

fn new_article(title: &str, slug: &str, status: &str, category_id: Option<i64>) -> NewArticle {
    NewArticle {
        title: title.to_string(),
        slug: slug.to_string(),
        content: format!("<p>{title} body</p>"),
        excerpt: format!("{title} body"),
        thumbnail: None,
        status: status.to_string(),
        category_id,
        published_at: None,
        meta_title: None,
        meta_description: None,
        meta_keywords: None,
        created_by: None,
    }
}

fn new_project(title: &str, category: &str) -> CreateProject {
    CreateProject {
        title: title.to_string(),
        location: Some("Makassar".to_string()),
        project_date: None,
        category: category.to_string(),
        subcategory: None,
        description: None,
    }
}

// ---------------------------------------------------------------------------
// Articles
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_article_crud_with_category(pool: PgPool) {
    let cat = CategoryRepo::create(&pool, &new_category("Berita"), "berita")
        .await
        .unwrap();

    let article = ArticleRepo::create(&pool, &new_article("Jalan Baru", "jalan-baru", "draft", Some(cat.id)))
        .await
        .unwrap();
    assert_eq!(article.category_slug.as_deref(), Some("berita"));
    assert_eq!(article.category_name.as_deref(), Some("Berita"));
    assert!(article.published_at.is_none());
    assert_eq!(article.view_count, 0);

    let update = UpdateArticle {
        title: Some("Jalan Tol Baru".to_string()),
        ..Default::default()
    };
    let updated = ArticleRepo::update(&pool, article.id, &update)
        .await
        .unwrap()
        .expect("article exists");
    assert_eq!(updated.title, "Jalan Tol Baru");
    assert_eq!(updated.slug, "jalan-baru");
    assert_eq!(updated.category_id, Some(cat.id));

    // Deleting the category detaches the article.
    assert!(CategoryRepo::delete(&pool, cat.id).await.unwrap());
    let orphan = ArticleRepo::find_by_id(&pool, article.id).await.unwrap().unwrap();
    assert_eq!(orphan.category_id, None);
    assert_eq!(orphan.category_name, None);

    assert!(ArticleRepo::delete(&pool, article.id).await.unwrap());
    assert!(!ArticleRepo::delete(&pool, article.id).await.unwrap());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_explicit_null_clears_category(pool: PgPool) {
    let cat = CategoryRepo::create(&pool, &new_category("Proyek"), "proyek")
        .await
        .unwrap();
    let article = ArticleRepo::create(&pool, &new_article("A", "a", "draft", Some(cat.id)))
        .await
        .unwrap();

    let update = UpdateArticle {
        category_id: Some(None),
        ..Default::default()
    };
    let updated = ArticleRepo::update(&pool, article.id, &update).await.unwrap().unwrap();
    assert_eq!(updated.category_id, None);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_publishing_stamps_published_at(pool: PgPool) {
    let article = ArticleRepo::create(&pool, &new_article("Draft", "draft", "draft", None))
        .await
        .unwrap();
    assert!(article.published_at.is_none());

    let publish = UpdateArticle {
        status: Some("published".to_string()),
        ..Default::default()
    };
    let published = ArticleRepo::update(&pool, article.id, &publish).await.unwrap().unwrap();
    assert!(published.published_at.is_some());

    let created_published =
        ArticleRepo::create(&pool, &new_article("Live", "live", "published", None))
            .await
            .unwrap();
    assert!(created_published.published_at.is_some());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_public_reads_only_see_published(pool: PgPool) {
    let cat = CategoryRepo::create(&pool, &new_category("Aspal"), "aspal")
        .await
        .unwrap();
    let live = ArticleRepo::create(&pool, &new_article("Hotmix", "hotmix", "published", Some(cat.id)))
        .await
        .unwrap();
    ArticleRepo::create(&pool, &new_article("Hotmix Draft", "hotmix-draft", "draft", Some(cat.id)))
        .await
        .unwrap();
    let sibling = ArticleRepo::create(&pool, &new_article("Lapen", "lapen", "published", Some(cat.id)))
        .await
        .unwrap();

    assert!(ArticleRepo::find_published_by_slug(&pool, "hotmix-draft")
        .await
        .unwrap()
        .is_none());
    assert!(ArticleRepo::find_published_by_slug(&pool, "hotmix")
        .await
        .unwrap()
        .is_some());

    let listed = ArticleRepo::list_published(&pool, Some("aspal"), 10, 0).await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(ArticleRepo::count_published(&pool, Some("aspal")).await.unwrap(), 2);
    assert_eq!(ArticleRepo::count_published(&pool, Some("other")).await.unwrap(), 0);

    let related = ArticleRepo::related(&pool, live.id, live.category_id, 3).await.unwrap();
    assert_eq!(related.len(), 1);
    assert_eq!(related[0].id, sibling.id);

    let hits = ArticleRepo::search_published(&pool, "%hotmix%", 5).await.unwrap();
    assert_eq!(hits.len(), 1);

    // Admin listing sees everything.
    let all = ArticleRepo::list(&pool, &ArticleFilter::default(), None, 50, 0).await.unwrap();
    assert_eq!(all.len(), 3);
    let drafts = ArticleRepo::list(
        &pool,
        &ArticleFilter {
            status: Some("draft".to_string()),
            ..Default::default()
        },
        None,
        50,
        0,
    )
    .await
    .unwrap();
    assert_eq!(drafts.len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_view_count_increments(pool: PgPool) {
    let article = ArticleRepo::create(&pool, &new_article("Beton", "beton", "published", None))
        .await
        .unwrap();
    assert_eq!(ArticleRepo::increment_view_count(&pool, article.id).await.unwrap(), 1);
    assert_eq!(ArticleRepo::increment_view_count(&pool, article.id).await.unwrap(), 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_duplicate_slug_violates_unique_constraint(pool: PgPool) {
    ArticleRepo::create(&pool, &new_article("A", "same", "draft", None))
        .await
        .unwrap();
    let err = ArticleRepo::create(&pool, &new_article("B", "same", "draft", None))
        .await
        .unwrap_err();
    assert_matches!(&err, sqlx::Error::Database(db) if db.constraint() == Some("uq_articles_slug"));

    CategoryRepo::create(&pool, &new_category("X"), "x").await.unwrap();
    let err = CategoryRepo::create(&pool, &new_category("Y"), "x")
        .await
        .unwrap_err();
    assert_matches!(&err, sqlx::Error::Database(db) if db.constraint() == Some("uq_categories_slug"));
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_project_images_are_appended_and_cascade(pool: PgPool) {
    let project = ProjectRepo::create(&pool, &new_project("Batching Plant Maros", "batching_plant"))
        .await
        .unwrap();

    let image = |path: &str| CreateProjectImage {
        image_path: path.to_string(),
        caption: None,
    };
    let first = ProjectImageRepo::create(&pool, project.id, &image("/uploads/projects/a.webp"))
        .await
        .unwrap();
    let second = ProjectImageRepo::create(&pool, project.id, &image("/uploads/projects/b.webp"))
        .await
        .unwrap();
    assert_eq!(first.sort_order, 1);
    assert_eq!(second.sort_order, 2);

    ProjectImageRepo::reorder(&pool, &[(second.id, 1), (first.id, 2)])
        .await
        .unwrap();
    let ids = ProjectImageRepo::ids_for_project(&pool, project.id).await.unwrap();
    assert_eq!(ids, vec![second.id, first.id]);

    let other = ProjectRepo::create(&pool, &new_project("Other", "construction"))
        .await
        .unwrap();
    assert!(!ProjectImageRepo::delete(&pool, other.id, first.id).await.unwrap());

    assert!(ProjectRepo::delete(&pool, project.id).await.unwrap());
    let leftover = ProjectImageRepo::list_for_projects(&pool, &[project.id]).await.unwrap();
    assert!(leftover.is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_project_category_check_constraint(pool: PgPool) {
    let result = ProjectRepo::create(&pool, &new_project("Bad", "shipyard")).await;
    assert_matches!(result, Err(sqlx::Error::Database(_)));

    ProjectRepo::create(&pool, &new_project("AMP Gowa", "asphalt_mixing_plant"))
        .await
        .unwrap();
    ProjectRepo::create(&pool, &new_project("Gedung", "construction"))
        .await
        .unwrap();
    let plants = ProjectRepo::list(&pool, Some("asphalt_mixing_plant")).await.unwrap();
    assert_eq!(plants.len(), 1);
    assert_eq!(ProjectRepo::search(&pool, "%gowa%", 5).await.unwrap().len(), 1);
}

// ---------------------------------------------------------------------------
// Prices
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_price_lists_keep_insertion_order(pool: PgPool) {
    for (code, price) in [("K-225", 850_000), ("K-300", 920_000)] {
        ConcretePriceRepo::create(
            &pool,
            &CreateConcretePrice {
                code: code.to_string(),
                name: format!("Beton {code}"),
                price,
                unit: None,
                description: None,
            },
        )
        .await
        .unwrap();
    }
    let list = ConcretePriceRepo::list(&pool).await.unwrap();
    assert_eq!(list.iter().map(|p| p.code.as_str()).collect::<Vec<_>>(), ["K-225", "K-300"]);
    assert_eq!(list[0].unit, "m3");

    let asphalt = AsphaltPriceRepo::create(
        &pool,
        &CreateAsphaltPrice {
            code: "AC-WC".to_string(),
            name: "Laston AC-WC".to_string(),
            price_loco: 1_000_000,
            price_tergelar: 1_250_000,
            unit: None,
            description: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(asphalt.unit, "ton");

    let patch = UpdateAsphaltPrice {
        price_tergelar: Some(1_300_000),
        ..Default::default()
    };
    let updated = AsphaltPriceRepo::update(&pool, asphalt.id, &patch).await.unwrap().unwrap();
    assert_eq!(updated.price_loco, 1_000_000);
    assert_eq!(updated.price_tergelar, 1_300_000);
}
