use std::borrow::Cow;
use std::collections::HashSet;

use catalogdb_core::{ScrapedProduct, ScrapedSpecification};
use catalogdb_db::{
    CatalogStore, NewProductAsset, NewProductImage, NewProductSpecification, ProductData,
    ProductTranslationData,
};

use super::{effective_locale, non_blank, position, UpsertOutcome};
use crate::error::ImportError;
use crate::normalize::{extract_tags_from_text, generate_slug, parse_specifications};

const KEYWORD_DELIMITER: &str = ",";

/// Creates or updates a product, its translation for the locale, and its
/// nested collections.
///
/// Images and specifications are cleared and recreated in array order.
/// Assets are only appended. Tags are matched by slug and linked if not
/// already linked; existing links are never removed.
///
/// # Errors
///
/// Returns [`ImportError::MissingKey`] for an empty SKU, or
/// [`ImportError::Db`] if any store call fails. Writes made before the
/// failing call are kept.
pub async fn upsert_product<S: CatalogStore + ?Sized>(
    store: &S,
    record: &ScrapedProduct,
    locale: &str,
) -> Result<UpsertOutcome, ImportError> {
    if record.sku.trim().is_empty() {
        return Err(ImportError::MissingKey {
            kind: "product",
            field: "sku",
        });
    }
    let locale = effective_locale(record.locale.as_deref(), locale);

    let category_id = match record
        .category_slug
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        Some(category_slug) => {
            let category = store.find_category_by_slug(category_slug).await?;
            if category.is_none() {
                tracing::warn!(
                    sku = %record.sku,
                    category_slug,
                    "product category not found; leaving category unset"
                );
            }
            category.map(|c| c.id)
        }
        None => None,
    };

    let data = ProductData {
        sku: record.sku.clone(),
        category_id,
        is_published: record.is_published,
        is_featured: record.is_featured,
        position: record.position,
    };
    let slug = if record.slug.trim().is_empty() {
        generate_slug(&record.name)
    } else {
        record.slug.clone()
    };
    let translation = ProductTranslationData {
        name: record.name.clone(),
        slug,
        short_description: non_blank(record.short_description.as_ref()),
        description: non_blank(record.description.as_ref()),
        features: non_blank(record.features.as_ref()),
        applications: non_blank(record.applications.as_ref()),
        meta_title: non_blank(record.meta_title.as_ref()),
        meta_description: non_blank(record.meta_description.as_ref()),
    };

    let (product_id, outcome) = match store.find_product_by_sku(&record.sku).await? {
        Some(existing) => {
            store.update_product(existing.id, &data).await?;
            (existing.id, UpsertOutcome::Updated)
        }
        None => {
            let created = store.create_product(&data).await?;
            (created.id, UpsertOutcome::Created)
        }
    };
    store
        .upsert_product_translation(product_id, locale, &translation)
        .await?;

    replace_images(store, product_id, record).await?;
    replace_specifications(store, product_id, record).await?;
    append_assets(store, product_id, record).await?;
    link_tags(store, product_id, record, locale).await?;

    Ok(outcome)
}

async fn replace_images<S: CatalogStore + ?Sized>(
    store: &S,
    product_id: i64,
    record: &ScrapedProduct,
) -> Result<(), ImportError> {
    store.delete_product_images(product_id).await?;

    // The first image is primary unless the scrape marked one explicitly.
    let has_primary = record.images.iter().any(|i| i.is_primary == Some(true));
    for (idx, image) in record.images.iter().enumerate() {
        let is_primary = if has_primary {
            image.is_primary == Some(true)
        } else {
            idx == 0
        };
        store
            .create_product_image(
                product_id,
                &NewProductImage {
                    url: image.url.clone(),
                    alt_text: non_blank(image.alt_text.as_ref()),
                    is_primary,
                    position: position(idx),
                },
            )
            .await?;
    }
    Ok(())
}

async fn replace_specifications<S: CatalogStore + ?Sized>(
    store: &S,
    product_id: i64,
    record: &ScrapedProduct,
) -> Result<(), ImportError> {
    let specs: Cow<'_, [ScrapedSpecification]> = if record.specifications.is_empty() {
        Cow::Owned(parse_specifications(&record.specification_rows))
    } else {
        Cow::Borrowed(record.specifications.as_slice())
    };

    store.delete_product_specifications(product_id).await?;
    for (idx, spec) in specs.iter().enumerate() {
        store
            .create_product_specification(
                product_id,
                &NewProductSpecification {
                    key: spec.key.clone(),
                    value: spec.value.clone(),
                    unit: non_blank(spec.unit.as_ref()),
                    position: position(idx),
                },
            )
            .await?;
    }
    Ok(())
}

// Assets accumulate across imports; there is no delete step.
async fn append_assets<S: CatalogStore + ?Sized>(
    store: &S,
    product_id: i64,
    record: &ScrapedProduct,
) -> Result<(), ImportError> {
    for asset in &record.assets {
        store
            .create_product_asset(
                product_id,
                &NewProductAsset {
                    asset_type: asset.asset_type.clone(),
                    url: asset.url.clone(),
                    file_name: non_blank(asset.file_name.as_ref()),
                    title: non_blank(asset.title.as_ref()),
                },
            )
            .await?;
    }
    Ok(())
}

async fn link_tags<S: CatalogStore + ?Sized>(
    store: &S,
    product_id: i64,
    record: &ScrapedProduct,
    locale: &str,
) -> Result<(), ImportError> {
    let names: Vec<String> = if record.tags.is_empty() {
        record
            .keywords
            .as_deref()
            .map(|k| extract_tags_from_text(k, KEYWORD_DELIMITER))
            .unwrap_or_default()
    } else {
        record.tags.iter().map(|t| t.trim().to_string()).collect()
    };

    let mut seen = HashSet::new();
    for name in names {
        let slug = generate_slug(&name);
        if slug.is_empty() {
            tracing::warn!(sku = %record.sku, tag = %name, "tag has no slug characters; not linked");
            continue;
        }
        if !seen.insert(slug.clone()) {
            continue;
        }

        let tag = match store.find_tag_by_slug(&slug).await? {
            Some(tag) => tag,
            None => store.create_tag(&slug).await?,
        };
        store.ensure_tag_translation(tag.id, locale, &name).await?;
        store.link_product_tag(product_id, tag.id).await?;
    }
    Ok(())
}
