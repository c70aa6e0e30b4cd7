//! Public page payloads under `/api/v1/pages/{locale}/...`.
//!
//! Every payload is `{"data": {"props": ..., "shared": ...}}`: `props` is
//! page specific, `shared` carries the globals the layout needs (company
//! contact details, locale switch target, navigation, signed-in user).

use axum::extract::{Path, Query, State};
use axum::Json;
use pondasi_core::article::{seo_meta, SeoMeta, PUBLIC_PAGE_SIZE, RELATED_ARTICLES};
use pondasi_core::chrome::ChromeSettings;
use pondasi_core::i18n::{display_role, navigation, NavItem};
use pondasi_core::locale::{localized_path, switch_locale_path, Locale};
use pondasi_core::org_tree::{build_tree, TreeNode};
use pondasi_core::pricing::{initial_quote, Quote};
use pondasi_core::project::{validate_category, HOME_PROJECT_COUNT};
use pondasi_core::search::page_offset;
use pondasi_core::services::{self, Service};
use pondasi_core::types::DbId;
use pondasi_db::models::article::{Article, ArticleSummary};
use pondasi_db::models::category::Category;
use pondasi_db::models::gallery::GalleryPhoto;
use pondasi_db::models::organization::{OrganizationMember, OrganizationMemberView};
use pondasi_db::models::price::{AsphaltPrice, ConcretePrice};
use pondasi_db::models::project::ProjectWithImages;
use pondasi_db::repositories::{
    ArticleRepo, AsphaltPriceRepo, CategoryRepo, ConcretePriceRepo, GalleryRepo,
    OrganizationRepo, ProjectImageRepo, ProjectRepo,
};
use serde::Serialize;

use super::projects::{not_found as project_not_found, with_images};
use crate::config::CompanyConfig;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::OptionalAuthUser;
use crate::query::CategoryParams;
use crate::response::{DataResponse, PagePayload, Pagination};
use crate::state::AppState;

/// Latest published articles on the home page.
const HOME_ARTICLE_COUNT: i64 = 3;

/// Gallery photos previewed on the home page.
const HOME_GALLERY_COUNT: i64 = 8;

type PageResponse<P> = Json<DataResponse<PagePayload<P, SharedProps>>>;

// ---------------------------------------------------------------------------
// Shared props
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct AlternateLocale {
    pub locale: Locale,
    pub url: String,
}

/// The signed-in user as seen by the layout.
#[derive(Debug, Serialize)]
pub struct SharedUser {
    pub id: DbId,
    pub username: String,
    pub role: String,
}

#[derive(Debug, Serialize)]
pub struct SharedProps {
    pub company: CompanyConfig,
    pub app_url: String,
    pub locale: Locale,
    pub alternate: AlternateLocale,
    pub navigation: Vec<NavItem>,
    pub user: Option<SharedUser>,
    pub chrome: ChromeSettings,
}

fn parse_locale(raw: &str) -> AppResult<Locale> {
    raw.parse::<Locale>()
        .map_err(|_| AppError::NotFound(format!("Unknown locale '{raw}'")))
}

/// Build the shared props for the page at `path` (without locale prefix).
fn shared_props(state: &AppState, locale: Locale, path: &str, user: OptionalAuthUser) -> SharedProps {
    let current = localized_path(locale, path);
    let target = locale.other();
    SharedProps {
        company: state.config.company.clone(),
        app_url: state.config.app_url.clone(),
        locale,
        alternate: AlternateLocale {
            locale: target,
            url: switch_locale_path(&current, target),
        },
        navigation: navigation(locale),
        user: user.0.map(|u| SharedUser {
            id: u.user_id,
            username: u.username,
            role: u.role,
        }),
        chrome: ChromeSettings::default(),
    }
}

fn page<P: Serialize>(props: P, shared: SharedProps) -> PageResponse<P> {
    Json(DataResponse {
        data: PagePayload { props, shared },
    })
}

// ---------------------------------------------------------------------------
// Home, services, contact
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct HomeProps {
    pub articles: Vec<ArticleSummary>,
    pub projects: Vec<ProjectWithImages>,
    pub services: Vec<Service>,
    pub gallery: Vec<GalleryPhoto>,
}

/// GET /api/v1/pages/{locale}/home
pub async fn home(
    State(state): State<AppState>,
    Path(locale): Path<String>,
    user: OptionalAuthUser,
) -> AppResult<PageResponse<HomeProps>> {
    let locale = parse_locale(&locale)?;

    let articles = ArticleRepo::list_published(&state.pool, None, HOME_ARTICLE_COUNT, 0).await?;
    let projects = ProjectRepo::latest(&state.pool, HOME_PROJECT_COUNT).await?;
    let projects = with_images(&state.pool, projects).await?;
    let gallery = GalleryRepo::list(&state.pool, Some(HOME_GALLERY_COUNT)).await?;

    let props = HomeProps {
        articles,
        projects,
        services: services::catalog(locale),
        gallery,
    };
    Ok(page(props, shared_props(&state, locale, "/", user)))
}

#[derive(Debug, Serialize)]
pub struct ServicesProps {
    pub services: Vec<Service>,
}

/// GET /api/v1/pages/{locale}/services
pub async fn services_page(
    State(state): State<AppState>,
    Path(locale): Path<String>,
    user: OptionalAuthUser,
) -> AppResult<PageResponse<ServicesProps>> {
    let locale = parse_locale(&locale)?;
    let props = ServicesProps {
        services: services::catalog(locale),
    };
    Ok(page(props, shared_props(&state, locale, "/services", user)))
}

#[derive(Debug, Serialize)]
pub struct ContactProps {
    pub company: CompanyConfig,
}

/// GET /api/v1/pages/{locale}/contact
pub async fn contact(
    State(state): State<AppState>,
    Path(locale): Path<String>,
    user: OptionalAuthUser,
) -> AppResult<PageResponse<ContactProps>> {
    let locale = parse_locale(&locale)?;
    let props = ContactProps {
        company: state.config.company.clone(),
    };
    Ok(page(props, shared_props(&state, locale, "/contact", user)))
}

// ---------------------------------------------------------------------------
// Articles
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct ArticlesProps {
    pub articles: Vec<ArticleSummary>,
    pub categories: Vec<Category>,
    pub active_category: Option<String>,
    pub pagination: Pagination,
}

/// GET /api/v1/pages/{locale}/articles?category=&page=
pub async fn articles(
    State(state): State<AppState>,
    Path(locale): Path<String>,
    Query(params): Query<CategoryParams>,
    user: OptionalAuthUser,
) -> AppResult<PageResponse<ArticlesProps>> {
    let locale = parse_locale(&locale)?;
    let category = params.category.filter(|c| !c.trim().is_empty());

    let offset = page_offset(params.page, PUBLIC_PAGE_SIZE);
    let articles =
        ArticleRepo::list_published(&state.pool, category.as_deref(), PUBLIC_PAGE_SIZE, offset)
            .await?;
    let total = ArticleRepo::count_published(&state.pool, category.as_deref()).await?;
    let categories = CategoryRepo::list(&state.pool).await?;

    let props = ArticlesProps {
        articles,
        categories,
        pagination: Pagination::new(params.page, PUBLIC_PAGE_SIZE, total),
        active_category: category,
    };
    Ok(page(props, shared_props(&state, locale, "/articles", user)))
}

#[derive(Debug, Serialize)]
pub struct ArticleDetailProps {
    pub article: Article,
    pub related: Vec<ArticleSummary>,
    pub seo: SeoMeta,
}

/// GET /api/v1/pages/{locale}/articles/{slug}
///
/// Only published articles are visible. Each view increments the counter.
pub async fn article_detail(
    State(state): State<AppState>,
    Path((locale, slug)): Path<(String, String)>,
    user: OptionalAuthUser,
) -> AppResult<PageResponse<ArticleDetailProps>> {
    let locale = parse_locale(&locale)?;
    let mut article = ArticleRepo::find_published_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Article '{slug}' not found")))?;

    article.view_count = ArticleRepo::increment_view_count(&state.pool, article.id).await?;
    let related =
        ArticleRepo::related(&state.pool, article.id, article.category_id, RELATED_ARTICLES)
            .await?;
    let seo = seo_meta(
        &article.title,
        article.excerpt.as_deref(),
        article.meta_title.as_deref(),
        article.meta_description.as_deref(),
        article.meta_keywords.as_deref(),
    );

    let path = format!("/articles/{slug}");
    let props = ArticleDetailProps {
        article,
        related,
        seo,
    };
    Ok(page(props, shared_props(&state, locale, &path, user)))
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct ProjectsProps {
    pub projects: Vec<ProjectWithImages>,
    pub active_category: Option<String>,
}

/// GET /api/v1/pages/{locale}/projects?category=
pub async fn projects(
    State(state): State<AppState>,
    Path(locale): Path<String>,
    Query(params): Query<CategoryParams>,
    user: OptionalAuthUser,
) -> AppResult<PageResponse<ProjectsProps>> {
    let locale = parse_locale(&locale)?;
    let category = params.category.filter(|c| !c.trim().is_empty());
    if let Some(category) = category.as_deref() {
        validate_category(category)?;
    }

    let projects = ProjectRepo::list(&state.pool, category.as_deref()).await?;
    let props = ProjectsProps {
        projects: with_images(&state.pool, projects).await?,
        active_category: category,
    };
    Ok(page(props, shared_props(&state, locale, "/projects", user)))
}

#[derive(Debug, Serialize)]
pub struct ProjectDetailProps {
    pub project: ProjectWithImages,
}

/// GET /api/v1/pages/{locale}/projects/{id}
pub async fn project_detail(
    State(state): State<AppState>,
    Path((locale, id)): Path<(String, DbId)>,
    user: OptionalAuthUser,
) -> AppResult<PageResponse<ProjectDetailProps>> {
    let locale = parse_locale(&locale)?;
    let project = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| project_not_found(id))?;
    let images = ProjectImageRepo::list_for_project(&state.pool, id).await?;

    let props = ProjectDetailProps {
        project: ProjectWithImages { project, images },
    };
    Ok(page(props, shared_props(&state, locale, &format!("/projects/{id}"), user)))
}

// ---------------------------------------------------------------------------
// Gallery, organization, prices
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct GalleryProps {
    pub photos: Vec<GalleryPhoto>,
}

/// GET /api/v1/pages/{locale}/gallery
pub async fn gallery(
    State(state): State<AppState>,
    Path(locale): Path<String>,
    user: OptionalAuthUser,
) -> AppResult<PageResponse<GalleryProps>> {
    let locale = parse_locale(&locale)?;
    let props = GalleryProps {
        photos: GalleryRepo::list(&state.pool, None).await?,
    };
    Ok(page(props, shared_props(&state, locale, "/gallery", user)))
}

#[derive(Debug, Serialize)]
pub struct OrganizationProps {
    pub tree: Vec<TreeNode<OrganizationMemberView>>,
}

/// GET /api/v1/pages/{locale}/organization
///
/// Role labels are translated when the member has a known role key.
pub async fn organization(
    State(state): State<AppState>,
    Path(locale): Path<String>,
    user: OptionalAuthUser,
) -> AppResult<PageResponse<OrganizationProps>> {
    let locale = parse_locale(&locale)?;
    let members = OrganizationRepo::list(&state.pool).await?;

    let to_view = |m: OrganizationMember| OrganizationMemberView {
        role: display_role(&m.role, m.role_key.as_deref(), locale),
        id: m.id,
        name: m.name,
        photo: m.photo,
    };
    let tree = build_tree(members)
        .into_iter()
        .map(|node| node.map(&to_view))
        .collect();

    Ok(page(
        OrganizationProps { tree },
        shared_props(&state, locale, "/organization", user),
    ))
}

#[derive(Debug, Serialize)]
pub struct PricesProps {
    pub concrete: Vec<ConcretePrice>,
    pub asphalt: Vec<AsphaltPrice>,
    /// First concrete entry at quantity 0; absent when the list is empty.
    pub concrete_quote: Option<Quote>,
    /// First asphalt entry, loco, at quantity 0; absent when the list is empty.
    pub asphalt_quote: Option<Quote>,
}

/// GET /api/v1/pages/{locale}/prices
pub async fn prices(
    State(state): State<AppState>,
    Path(locale): Path<String>,
    user: OptionalAuthUser,
) -> AppResult<PageResponse<PricesProps>> {
    let locale = parse_locale(&locale)?;
    let concrete = ConcretePriceRepo::list(&state.pool).await?;
    let asphalt = AsphaltPriceRepo::list(&state.pool).await?;

    let props = PricesProps {
        concrete_quote: initial_quote(&concrete),
        asphalt_quote: initial_quote(&asphalt),
        concrete,
        asphalt,
    };
    Ok(page(props, shared_props(&state, locale, "/prices", user)))
}
