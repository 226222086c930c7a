use sea_orm::DatabaseConnection;

use crate::{
    model::content::{BlogPostCreateDto, BlogPostUpdateDto},
    server::{
        data::content::{blog::BlogSort, BlogRepository},
        error::{content::ContentError, Error},
    },
};

static MAX_PAGE_SIZE: u64 = 50;
static DEFAULT_PAGE_SIZE: u64 = 10;

pub struct BlogService<'a> {
    app_db: &'a DatabaseConnection,
}

impl<'a> BlogService<'a> {
    /// Creates a new instance of [`BlogService`]
    pub fn new(app_db: &'a DatabaseConnection) -> Self {
        Self { app_db }
    }

    /// Published posts with pagination clamps matching the public API.
    pub async fn list_published(
        &self,
        page: u64,
        limit: u64,
        sort: &str,
    ) -> Result<(Vec<entity::blog_post::Model>, u64, u64, u64), Error> {
        let page = page.max(1);
        let limit = match limit {
            0 => DEFAULT_PAGE_SIZE,
            limit => limit.min(MAX_PAGE_SIZE),
        };
        let sort = match sort {
            "oldest" => BlogSort::Oldest,
            _ => BlogSort::Newest,
        };

        let (posts, total) = BlogRepository::new(self.app_db)
            .list_published(page, limit, sort)
            .await?;

        let pages = match total {
            0 => 1,
            total => total.div_ceil(limit),
        };

        Ok((posts, total, page, pages))
    }

    pub async fn get_published_by_slug(
        &self,
        slug: &str,
    ) -> Result<entity::blog_post::Model, Error> {
        let post = BlogRepository::new(self.app_db)
            .get_by_slug(slug)
            .await?
            .filter(|post| post.published)
            .ok_or(ContentError::PostNotFound)?;

        Ok(post)
    }

    /// Creates a post with a slug generated from the title. Duplicate slugs
    /// are rejected rather than silently suffixed.
    pub async fn create_post(
        &self,
        create: &BlogPostCreateDto,
    ) -> Result<entity::blog_post::Model, Error> {
        let slug = slugify(&create.title);
        if slug.is_empty() {
            return Err(ContentError::EmptyTitle.into());
        }

        let repo = BlogRepository::new(self.app_db);

        if repo.get_by_slug(&slug).await?.is_some() {
            return Err(ContentError::DuplicateSlug(slug).into());
        }

        let excerpt = create.excerpt.clone().unwrap_or_default();
        let post = repo
            .create(
                &create.title,
                &slug,
                &create.content,
                &excerpt,
                &create.author,
                create.published,
            )
            .await?;

        Ok(post)
    }

    /// Applies a partial update. The slug is intentionally stable across
    /// title edits so published URLs keep working.
    pub async fn update_post(
        &self,
        id: i32,
        update: &BlogPostUpdateDto,
    ) -> Result<entity::blog_post::Model, Error> {
        let repo = BlogRepository::new(self.app_db);
        let post = repo.get_by_id(id).await?.ok_or(ContentError::PostNotFound)?;

        let updated = repo
            .update(
                post,
                update.title.as_deref(),
                update.content.as_deref(),
                update.excerpt.as_deref(),
                update.published,
            )
            .await?;

        Ok(updated)
    }

    pub async fn delete_post(&self, id: i32) -> Result<(), Error> {
        let result = BlogRepository::new(self.app_db).delete(id).await?;

        if result.rows_affected == 0 {
            return Err(ContentError::PostNotFound.into());
        }

        Ok(())
    }
}

/// Lowercases the title and collapses every non-alphanumeric run into a
/// single dash.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut last_was_dash = true;

    for ch in title.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
            last_was_dash = false;
        } else if !last_was_dash {
            slug.push('-');
            last_was_dash = true;
        }
    }

    slug.trim_end_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use stanton_test_utils::prelude::*;

    use super::*;

    fn create_dto(title: &str, published: bool) -> BlogPostCreateDto {
        BlogPostCreateDto {
            title: title.to_string(),
            content: "content".to_string(),
            excerpt: None,
            author: "admin".to_string(),
            published,
        }
    }

    #[test]
    fn slugify_collapses_punctuation() {
        assert_eq!(slugify("Hello, World!"), "hello-world");
        assert_eq!(slugify("  Fleet Week 2955  "), "fleet-week-2955");
        assert_eq!(slugify("!!!"), "");
    }

    /// Expect duplicate titles to be rejected by slug uniqueness
    #[tokio::test]
    async fn duplicate_slugs_are_rejected() -> Result<(), TestError> {
        let test = test_setup_with_tables!(entity::prelude::BlogPost)?;
        let service = BlogService::new(&test.app_db);

        service.create_post(&create_dto("Fleet Week", true)).await.unwrap();
        let duplicate = service.create_post(&create_dto("Fleet Week", true)).await;

        assert!(matches!(
            duplicate,
            Err(Error::ContentError(ContentError::DuplicateSlug(_)))
        ));

        Ok(())
    }

    /// Expect the public listing to hide drafts and clamp the page size
    #[tokio::test]
    async fn public_listing_hides_drafts() -> Result<(), TestError> {
        let test = test_setup_with_tables!(entity::prelude::BlogPost)?;
        let service = BlogService::new(&test.app_db);

        service.create_post(&create_dto("Published", true)).await.unwrap();
        service.create_post(&create_dto("Draft", false)).await.unwrap();

        let (posts, total, page, pages) = service.list_published(0, 500, "newest").await.unwrap();

        assert_eq!(total, 1);
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "Published");
        assert_eq!(page, 1);
        assert_eq!(pages, 1);

        let draft = service.get_published_by_slug("draft").await;
        assert!(matches!(
            draft,
            Err(Error::ContentError(ContentError::PostNotFound))
        ));

        Ok(())
    }
}
