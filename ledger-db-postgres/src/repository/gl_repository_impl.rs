use async_trait::async_trait;
use ledger_api::error::LedgerResult;
use ledger_db::models::gl::GlSetupModel;
use ledger_db::repository::GlRepository;
use sqlx::PgPool;

pub struct GlRepositoryImpl {
    pool: PgPool,
}

impl GlRepositoryImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GlRepository for GlRepositoryImpl {
    async fn find_by_num(&self, gl_num: &str) -> LedgerResult<Option<GlSetupModel>> {
        let row = sqlx::query_as::<_, GlSetupModel>(
            "SELECT gl_num, gl_name, layer_id, parent_gl_num, layer_gl_num, is_overdraft FROM gl_setup WHERE gl_num = $1",
        )
        .bind(gl_num)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn find_children(&self, parent_gl_num: &str) -> LedgerResult<Vec<GlSetupModel>> {
        let rows = sqlx::query_as::<_, GlSetupModel>(
            "SELECT gl_num, gl_name, layer_id, parent_gl_num, layer_gl_num, is_overdraft FROM gl_setup WHERE parent_gl_num = $1 ORDER BY gl_num",
        )
        .bind(parent_gl_num)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn find_active(&self) -> LedgerResult<Vec<GlSetupModel>> {
        let rows = sqlx::query_as::<_, GlSetupModel>(
            r#"
            SELECT DISTINCT g.gl_num, g.gl_name, g.layer_id, g.parent_gl_num, g.layer_gl_num, g.is_overdraft
            FROM gl_setup g
            JOIN accounts a ON a.gl_num = g.gl_num
            WHERE a.status IN ('Active', 'Dormant')
            ORDER BY g.gl_num
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn insert(&self, gl: GlSetupModel) -> LedgerResult<GlSetupModel> {
        let row = sqlx::query_as::<_, GlSetupModel>(
            r#"
            INSERT INTO gl_setup (gl_num, gl_name, layer_id, parent_gl_num, layer_gl_num, is_overdraft)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING gl_num, gl_name, layer_id, parent_gl_num, layer_gl_num, is_overdraft
            "#,
        )
        .bind(&gl.gl_num)
        .bind(&gl.gl_name)
        .bind(gl.layer_id)
        .bind(&gl.parent_gl_num)
        .bind(&gl.layer_gl_num)
        .bind(gl.is_overdraft)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }
}
