use models::advertisement::{
    self, AdvertisementChanges, AdvertisementFilter, Entity as AdvertisementEntity, Model,
    NewAdvertisement,
};
use models::Validated;
use sea_orm::sea_query::{Expr, Func, LikeExpr, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DatabaseTransaction, DbErr,
    EntityTrait, QueryFilter, QueryOrder, QuerySelect, Select, Set, TransactionTrait,
};
use tracing::{debug, warn};

use crate::advertisement::repository::AdvertisementRepository;
use crate::errors::ServiceError;
use crate::pagination::Pagination;

/// SeaORM-backed repository implementation.
///
/// Owns the connection pool handle; every write runs in its own transaction.
#[derive(Clone)]
pub struct SeaOrmAdvertisementRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmAdvertisementRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn begin(&self) -> Result<DatabaseTransaction, ServiceError> {
        self.db.begin().await.map_err(ServiceError::from_db)
    }
}

/// Commit on success, roll back on failure.
async fn settle<T>(txn: DatabaseTransaction, outcome: Result<T, DbErr>) -> Result<T, ServiceError> {
    match outcome {
        Ok(value) => {
            txn.commit().await.map_err(ServiceError::from_db)?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rb) = txn.rollback().await {
                warn!(error = %rb, "transaction rollback failed");
            }
            Err(ServiceError::from_db(err))
        }
    }
}

async fn apply_changes(
    txn: &DatabaseTransaction,
    id: i32,
    changes: AdvertisementChanges,
) -> Result<Option<Model>, DbErr> {
    let Some(existing) = AdvertisementEntity::find_by_id(id).lock_exclusive().one(txn).await? else {
        return Ok(None);
    };
    if changes.is_empty() {
        return Ok(Some(existing));
    }
    let mut am: advertisement::ActiveModel = existing.into();
    changes.apply_to_active(&mut am);
    am.update(txn).await.map(Some)
}

fn escape_like(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// `LOWER(col) LIKE '%needle%'` with the needle matched literally.
fn contains_ci(col: advertisement::Column, needle: &str) -> SimpleExpr {
    let pattern = format!("%{}%", escape_like(&needle.to_lowercase()));
    Expr::expr(Func::lower(Expr::col((AdvertisementEntity, col))))
        .like(LikeExpr::new(pattern).escape('\\'))
}

fn search_condition(filter: &AdvertisementFilter) -> Condition {
    let mut cond = Condition::all();
    if let Some(t) = &filter.title {
        cond = cond.add(contains_ci(advertisement::Column::Title, t));
    }
    if let Some(d) = &filter.description {
        cond = cond.add(contains_ci(advertisement::Column::Description, d));
    }
    if let Some(a) = &filter.author {
        cond = cond.add(contains_ci(advertisement::Column::Author, a));
    }
    if let Some(min) = filter.min_price {
        cond = cond.add(advertisement::Column::Price.gte(min));
    }
    if let Some(max) = filter.max_price {
        cond = cond.add(advertisement::Column::Price.lte(max));
    }
    cond
}

/// Filtered, newest-first select. No WHERE clause when nothing is filtered.
fn search_select(filter: &AdvertisementFilter) -> Select<AdvertisementEntity> {
    let cond = search_condition(filter);
    let select = if cond.is_empty() {
        AdvertisementEntity::find()
    } else {
        AdvertisementEntity::find().filter(cond)
    };
    select
        .order_by_desc(advertisement::Column::CreatedAt)
        .order_by_desc(advertisement::Column::Id)
}

#[async_trait::async_trait]
impl AdvertisementRepository for SeaOrmAdvertisementRepository {
    async fn create(&self, input: Validated<NewAdvertisement>) -> Result<Model, ServiceError> {
        let input = input.into_inner();
        // id and created_at come from the database
        let am = advertisement::ActiveModel {
            title: Set(input.title),
            description: Set(input.description),
            price: Set(input.price),
            author: Set(input.author),
            ..Default::default()
        };
        let txn = self.begin().await?;
        let outcome = am.insert(&txn).await;
        settle(txn, outcome).await
    }

    async fn get(&self, id: i32) -> Result<Option<Model>, ServiceError> {
        AdvertisementEntity::find_by_id(id).one(&self.db).await.map_err(ServiceError::from_db)
    }

    async fn update(
        &self,
        id: i32,
        changes: Validated<AdvertisementChanges>,
    ) -> Result<Option<Model>, ServiceError> {
        let txn = self.begin().await?;
        let outcome = apply_changes(&txn, id, changes.into_inner()).await;
        settle(txn, outcome).await
    }

    async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        let txn = self.begin().await?;
        let outcome = AdvertisementEntity::delete_by_id(id)
            .exec(&txn)
            .await
            .map(|res| res.rows_affected > 0);
        settle(txn, outcome).await
    }

    async fn search(
        &self,
        filter: &AdvertisementFilter,
        page: Pagination,
    ) -> Result<Vec<Model>, ServiceError> {
        let (offset, limit) = page.normalize();
        debug!(?filter, offset, limit, "search advertisements");
        search_select(filter)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(ServiceError::from_db)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{get_db, unique};
    use rust_decimal::Decimal;
    use sea_orm::{DbBackend, QueryTrait};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn new_ad(
        title: &str,
        description: &str,
        price: &str,
        author: &str,
    ) -> Validated<NewAdvertisement> {
        NewAdvertisement {
            title: title.into(),
            description: description.into(),
            price: dec(price),
            author: author.into(),
        }
        .validate()
        .unwrap()
    }

    #[test]
    fn escape_like_escapes_wildcards() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(escape_like("plain"), "plain");
    }

    #[test]
    fn search_sql_shape() {
        let filter = AdvertisementFilter {
            title: Some("Bike".into()),
            min_price: Some(dec("10")),
            ..Default::default()
        };
        let sql = search_select(&filter).build(DbBackend::Postgres).to_string();
        assert!(sql.contains(r#"LOWER("advertisements"."title") LIKE '%bike%'"#), "{sql}");
        assert!(sql.contains(r#""advertisements"."price" >= 10"#), "{sql}");
        assert!(sql.contains(" AND "), "{sql}");
        assert!(sql.contains(r#"ORDER BY "advertisements"."created_at" DESC"#), "{sql}");
    }

    #[test]
    fn empty_filter_has_no_where_clause() {
        let sql = search_select(&AdvertisementFilter::default())
            .build(DbBackend::Postgres)
            .to_string();
        assert!(!sql.contains("WHERE"), "{sql}");
        let order = r#"ORDER BY "advertisements"."created_at" DESC, "advertisements"."id" DESC"#;
        assert!(sql.contains(order), "{sql}");
    }

    #[tokio::test]
    async fn seaorm_repository_crud() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await else {
            return Ok(());
        };
        let repo = SeaOrmAdvertisementRepository::new(db);
        let author = unique("repo_crud");

        let created = repo.create(new_ad("Bike", "Road bike", "150", &author)).await?;
        assert_eq!(created.price.to_string(), "150.00");
        let found = repo.get(created.id).await?.expect("created row");
        assert_eq!(found, created);

        let changes = models::advertisement::AdvertisementPatch {
            price: Some(Some(dec("120"))),
            ..Default::default()
        }
        .validate()?;
        let updated = repo.update(created.id, changes).await?.expect("updated row");
        assert_eq!(updated.price, dec("120.00"));
        assert_eq!(updated.title, "Bike");
        assert_eq!(updated.created_at, created.created_at);

        let unchanged = repo
            .update(created.id, models::advertisement::AdvertisementPatch::default().validate()?)
            .await?
            .expect("row");
        assert_eq!(unchanged, updated);

        assert!(repo.delete(created.id).await?);
        assert!(repo.get(created.id).await?.is_none());
        assert!(!repo.delete(created.id).await?);
        let none = repo
            .update(created.id, models::advertisement::AdvertisementPatch::default().validate()?)
            .await?;
        assert!(none.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn seaorm_repository_search() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await else {
            return Ok(());
        };
        let repo = SeaOrmAdvertisementRepository::new(db);
        let author = unique("repo_search");

        let a = repo.create(new_ad("Red bike", "fast", "100", &author)).await?;
        let b = repo.create(new_ad("Blue BIKE", "50% off_today", "200", &author)).await?;
        let c = repo.create(new_ad("Sofa", "comfy", "300", &author)).await?;

        let by_author = AdvertisementFilter {
            author: Some(author.to_uppercase()),
            ..Default::default()
        };
        let all = repo.search(&by_author, Pagination::default()).await?;
        assert_eq!(all.iter().map(|m| m.id).collect::<Vec<_>>(), vec![c.id, b.id, a.id]);

        let bikes = AdvertisementFilter {
            title: Some("bike".into()),
            min_price: Some(dec("150")),
            ..by_author.clone()
        };
        let hits = repo.search(&bikes, Pagination::default()).await?;
        assert_eq!(hits.iter().map(|m| m.id).collect::<Vec<_>>(), vec![b.id]);

        // wildcards in the needle match literally
        let literal = AdvertisementFilter {
            description: Some("50%".into()),
            ..by_author.clone()
        };
        assert_eq!(repo.search(&literal, Pagination::default()).await?.len(), 1);
        let underscore = AdvertisementFilter {
            description: Some("f_t".into()),
            ..by_author.clone()
        };
        assert!(repo.search(&underscore, Pagination::default()).await?.is_empty());

        let page = repo.search(&by_author, Pagination::new(1, 1)).await?;
        assert_eq!(page.iter().map(|m| m.id).collect::<Vec<_>>(), vec![b.id]);

        for m in [a, b, c] {
            repo.delete(m.id).await?;
        }
        Ok(())
    }

    #[tokio::test]
    async fn integrity_errors_map_to_constraint_violation() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await else {
            return Ok(());
        };
        // bypass validation to hit the CHECK (price > 0) constraint
        let am = advertisement::ActiveModel {
            title: Set("Free".into()),
            description: Set("nothing".into()),
            price: Set(Decimal::ZERO),
            author: Set(unique("repo_check")),
            ..Default::default()
        };
        let txn = db.begin().await?;
        let outcome = am.insert(&txn).await;
        let err = settle(txn, outcome).await.unwrap_err();
        assert!(matches!(err, ServiceError::ConstraintViolation(_)), "{err:?}");
        Ok(())
    }
}
