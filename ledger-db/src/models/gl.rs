use ledger_api::domain::gl::GlSetup;
use serde::{Deserialize, Serialize};

/// `GL_Setup` row (spec.md §6).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct GlSetupModel {
    pub gl_num: String,
    pub gl_name: String,
    pub layer_id: i16,
    pub parent_gl_num: Option<String>,
    pub layer_gl_num: String,
    pub is_overdraft: bool,
}

impl From<GlSetupModel> for GlSetup {
    fn from(m: GlSetupModel) -> Self {
        GlSetup {
            gl_num: m.gl_num,
            gl_name: m.gl_name,
            layer_id: m.layer_id as u8,
            parent_gl_num: m.parent_gl_num,
            layer_gl_num: m.layer_gl_num,
            is_overdraft: m.is_overdraft,
        }
    }
}

impl From<GlSetup> for GlSetupModel {
    fn from(d: GlSetup) -> Self {
        GlSetupModel {
            gl_num: d.gl_num,
            gl_name: d.gl_name,
            layer_id: d.layer_id as i16,
            parent_gl_num: d.parent_gl_num,
            layer_gl_num: d.layer_gl_num,
            is_overdraft: d.is_overdraft,
        }
    }
}
