//! Operation documents sent to the Quire GraphQL API.

pub const SIGN_UP: &str = r"
mutation SignUp($input: CreateUserInput!) {
  signUp(input: $input) {
    accessToken
    refreshToken
  }
}";

pub const SIGN_IN: &str = r"
mutation SignIn($input: SignInInput!) {
  signIn(input: $input) {
    accessToken
    refreshToken
  }
}";

pub const REFRESH_TOKENS: &str = r"
mutation RefreshTokens {
  refreshTokens {
    accessToken
    refreshToken
  }
}";

pub const LOGOUT: &str = r"
mutation Logout {
  logout
}";

pub const GET_USERS_PROJECTS: &str = r"
query GetUsersProjects {
  getUsersProjects {
    id name description ownerName createdDate modifiedDate isArchive noteCount
  }
}";

pub const GET_PROJECT: &str = r"
query GetProject($projectId: String!) {
  getProject(projectId: $projectId) {
    id name description ownerName createdDate modifiedDate isArchive noteCount
    notes {
      id title content labels pinned visibility createdAt updatedAt
    }
  }
}";

pub const CREATE_PROJECT: &str = r"
mutation CreateProject($input: CreateProjectInput!) {
  createProject(input: $input) {
    id name description ownerName createdDate modifiedDate isArchive noteCount
  }
}";

pub const UPDATE_PROJECT: &str = r"
mutation UpdateProject($projectId: String!, $input: UpdateProjectInput!) {
  updateProject(projectId: $projectId, input: $input) {
    id name description ownerName createdDate modifiedDate isArchive noteCount
  }
}";

pub const REMOVE_PROJECT: &str = r"
mutation RemoveProject($projectId: String!) {
  removeProject(projectId: $projectId)
}";

pub const ARCHIVE_PROJECT: &str = r"
mutation ArchiveProject($projectId: String!) {
  archiveProject(projectId: $projectId) {
    id
    isArchive
  }
}";

pub const UNARCHIVE_PROJECT: &str = r"
mutation UnarchiveProject($projectId: String!) {
  unarchiveProject(projectId: $projectId) {
    id
    isArchive
  }
}";

pub const GET_PROJECT_NOTES: &str = r"
query GetProjectNotes($projectId: String!) {
  getProjectsNotes(projectId: $projectId) {
    id title content labels pinned visibility createdAt updatedAt
  }
}";

pub const GET_USERS_NOTES: &str = r"
query GetUsersNotes {
  getUsersNotes {
    id title content projectId labels pinned visibility createdAt updatedAt
  }
}";

pub const CREATE_NOTE: &str = r"
mutation CreateNote($input: CreateNoteInput!) {
  createNote(input: $input) {
    id title content labels pinned visibility createdAt updatedAt
  }
}";

pub const REMOVE_NOTE: &str = r"
mutation RemoveNote($noteId: String!) {
  removeNote(noteId: $noteId)
}";

pub const SEARCH: &str = r"
query Search($query: String!) {
  search(query: $query) {
    __typename
    ... on Project {
      id name description ownerName createdDate modifiedDate isArchive noteCount
    }
    ... on Note {
      id title content projectId labels pinned visibility createdAt updatedAt
    }
  }
}";

pub const UPDATE_USER: &str = r"
mutation UpdateUser($input: UpdateUserInput!) {
  updateUser(input: $input) {
    id name email createdAt updatedAt
  }
}";

pub const CHANGE_PASSWORD: &str = r"
mutation ChangePassword($input: ChangePasswordInput!) {
  changePassword(input: $input) {
    success
    message
  }
}";
