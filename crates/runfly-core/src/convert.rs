// ── API-to-domain type conversions ──
//
// Bridges raw `runfly_api` wire types into canonical `runfly_core::model`
// domain types. Each `From` impl normalizes identifiers into newtypes
// and rebuilds ordered collections; this is the only module where the
// two vocabularies meet.

use runfly_api::models::{
    AccessLevelDto, CollaboratorDto, DeployStatusDto, KeyValueDto, ParamValueDto, ProjectDto,
    RunRecordDto, TeamDto, UserDto,
};

use crate::model::{
    Collaborator, DeployStatusInfo, DeploymentMeta, KeyValue, ParamValue, Project, RunRecord, User,
    UserAccess,
};
use crate::services::Team;

// ── Users and access ───────────────────────────────────────────────

impl From<UserDto> for User {
    fn from(dto: UserDto) -> Self {
        Self {
            id: dto.id.into(),
            email: dto.email,
            username: dto.username,
        }
    }
}

impl From<AccessLevelDto> for UserAccess {
    fn from(dto: AccessLevelDto) -> Self {
        match dto {
            AccessLevelDto::Owner => Self::Owner,
            AccessLevelDto::ReadWrite => Self::ReadWrite,
            AccessLevelDto::ReadOnly => Self::ReadOnly,
        }
    }
}

impl From<UserAccess> for AccessLevelDto {
    fn from(access: UserAccess) -> Self {
        match access {
            UserAccess::Owner => Self::Owner,
            UserAccess::ReadWrite => Self::ReadWrite,
            UserAccess::ReadOnly => Self::ReadOnly,
        }
    }
}

impl From<CollaboratorDto> for Collaborator {
    fn from(dto: CollaboratorDto) -> Self {
        Self {
            user: dto.user.into(),
            access: dto.access.into(),
        }
    }
}

impl From<TeamDto> for Team {
    fn from(dto: TeamDto) -> Self {
        Self {
            owner: dto.owner.into(),
            collaborators: dto.collaborators.into_iter().map(Into::into).collect(),
        }
    }
}

// ── Projects and runs ──────────────────────────────────────────────

impl From<ProjectDto> for Project {
    fn from(dto: ProjectDto) -> Self {
        Self {
            id: dto.id.into(),
            name: dto.name,
            description: dto.description,
            author: dto.author.into(),
            collaborators: dto
                .collaborators
                .into_iter()
                .map(|c| {
                    let collaborator: Collaborator = c.into();
                    (collaborator.user.id.clone(), collaborator)
                })
                .collect(),
        }
    }
}

impl From<ParamValueDto> for ParamValue {
    fn from(dto: ParamValueDto) -> Self {
        match dto {
            ParamValueDto::Number(n) => Self::Number(n),
            ParamValueDto::Text(s) => Self::Text(s),
        }
    }
}

impl From<KeyValueDto> for KeyValue {
    fn from(dto: KeyValueDto) -> Self {
        Self {
            key: dto.key,
            value: dto.value.into(),
        }
    }
}

impl From<RunRecordDto> for RunRecord {
    fn from(dto: RunRecordDto) -> Self {
        Self {
            id: dto.id.into(),
            name: dto.name,
            project_id: dto.project_id.into(),
            date_created: dto.date_created,
            metrics: dto.metrics.into_iter().map(Into::into).collect(),
            hyperparameters: dto.hyperparameters.into_iter().map(Into::into).collect(),
        }
    }
}

// ── Deployment ─────────────────────────────────────────────────────

impl From<DeployStatusDto> for DeployStatusInfo {
    fn from(dto: DeployStatusDto) -> Self {
        match dto {
            DeployStatusDto::NotDeployed { error } => Self::NotDeployed { error },
            DeployStatusDto::Deploying => Self::Deploying,
            DeployStatusDto::Deployed { data } => Self::Deployed {
                meta: DeploymentMeta {
                    endpoint: data.endpoint,
                    token: data.token,
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::UserId;

    fn user_dto(id: &str, email: &str) -> UserDto {
        UserDto {
            id: id.into(),
            email: email.into(),
            username: None,
        }
    }

    #[test]
    fn access_levels_round_trip() {
        for access in [UserAccess::Owner, UserAccess::ReadWrite, UserAccess::ReadOnly] {
            let dto: AccessLevelDto = access.into();
            assert_eq!(UserAccess::from(dto), access);
        }
    }

    #[test]
    fn project_roster_is_keyed_and_ordered() {
        let dto = ProjectDto {
            id: "p1".into(),
            name: "churn-model".into(),
            description: None,
            author: user_dto("owner", "owner@example.com"),
            collaborators: vec![
                CollaboratorDto {
                    user: user_dto("b", "b@example.com"),
                    access: AccessLevelDto::ReadOnly,
                },
                CollaboratorDto {
                    user: user_dto("a", "a@example.com"),
                    access: AccessLevelDto::ReadWrite,
                },
            ],
        };

        let project: Project = dto.into();
        let ids: Vec<_> = project.collaborators.keys().map(UserId::as_str).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(
            project.access_of(&UserId::from("a")),
            Some(UserAccess::ReadWrite)
        );
    }

    #[test]
    fn deploy_status_maps_every_arm() {
        let idle: DeployStatusInfo = DeployStatusDto::NotDeployed { error: None }.into();
        assert_eq!(idle, DeployStatusInfo::idle());

        let failed: DeployStatusInfo = DeployStatusDto::NotDeployed {
            error: Some("no capacity".into()),
        }
        .into();
        assert_eq!(failed.error(), Some("no capacity"));

        let live: DeployStatusInfo = DeployStatusDto::Deployed {
            data: runfly_api::models::DeployMetaDto {
                endpoint: "https://predict.runfly.dev/r1".into(),
                token: Some("tok".into()),
            },
        }
        .into();
        assert!(live.is_terminal());
    }

    #[test]
    fn run_values_keep_their_shape() {
        let dto = KeyValueDto {
            key: "optimizer".into(),
            value: ParamValueDto::Text("adam".into()),
        };
        let kv: KeyValue = dto.into();
        assert_eq!(kv.value.as_number(), None);
    }
}
