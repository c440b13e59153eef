use thiserror::Error;

/// Why an operation was turned down.
///
/// Nothing here is fatal: every rejection leaves the game state untouched and
/// the caller may surface the message through the log channel. Display texts
/// come from the in-game text catalog.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Rejection {
    // Preconditions
    #[error("动作过快，请稍候")]
    Paced,
    #[error("战斗双方必须都还活着")]
    NotAlive,
    #[error("当前不在战斗中")]
    NotInCombat,
    #[error("你正在战斗中")]
    AlreadyInCombat,
    #[error("内力不足，无法使用{ability}！")]
    InsufficientQi { ability: String, cost: u32, available: u32 },
    #[error("{name}尚在冷却中（剩余{remaining}回合）")]
    OnCooldown { name: String, remaining: u32 },
    #[error("不满足{name}的使用条件")]
    RequirementsUnmet { name: String },
    #[error("该核心能力已经选择过了")]
    SlotFilled,
    #[error("境界不足，需要达到{required}品")]
    RankTooLow { required: u8 },
    #[error("已达最高境界，无法继续突破")]
    RankCeiling,
    #[error("当前无法突破，需要积累更多经验（{current}/{required}）")]
    NotEnoughExperience { current: u64, required: u64 },
    #[error("你已经学会了{name}")]
    AlreadyLearned { name: String },
    #[error("你已经拥有先天心法")]
    AlreadyHasInborn,
    #[error("你还没有先天心法")]
    NoInbornMethod,
    #[error("无法获得{name}，背包已满！")]
    InventoryFull { name: String },
    #[error("任务「{title}」尚未完成")]
    QuestIncomplete { title: String },
    #[error("未找到此任务")]
    QuestNotActive,
    #[error("你的境界不足以装备{name}。")]
    CannotEquip { name: String },
    #[error("{message}")]
    NotUsable { message: String },

    // Invalid references
    #[error("无效的索引：{index}")]
    UnknownIndex { index: usize },
    #[error("未知的{kind}：{id}")]
    UnknownId { kind: &'static str, id: String },
}

impl Rejection {
    /// Rejections worth echoing to the player as a warning-class message.
    /// Pacing and liveness rejections are silent: the game loop simply polls
    /// again next frame.
    pub fn is_warning(&self) -> bool {
        !matches!(
            self,
            Rejection::Paced | Rejection::NotAlive | Rejection::NotInCombat
        )
    }

    pub fn is_invalid_reference(&self) -> bool {
        matches!(
            self,
            Rejection::UnknownIndex { .. } | Rejection::UnknownId { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_qi_message() {
        let r = Rejection::InsufficientQi {
            ability: "气力拳".to_string(),
            cost: 10,
            available: 0,
        };
        assert_eq!(r.to_string(), "内力不足，无法使用气力拳！");
        assert!(r.is_warning());
    }

    #[test]
    fn test_pacing_is_silent() {
        assert!(!Rejection::Paced.is_warning());
        assert!(!Rejection::NotAlive.is_warning());
    }

    #[test]
    fn test_invalid_reference_classification() {
        assert!(Rejection::UnknownIndex { index: 3 }.is_invalid_reference());
        assert!(!Rejection::SlotFilled.is_invalid_reference());
    }
}
