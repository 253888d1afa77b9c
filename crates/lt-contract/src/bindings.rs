//! ABI of the deployed link registry.

use alloy_sol_types::sol;

sol! {
    #[derive(Debug, PartialEq, Eq)]
    struct Link {
        string title;
        string url;
    }

    #[sol(all_derives)]
    interface ILinkRegistry {
        function saveLinks(Link[] memory links) external;
        function getLinks(address user) external view returns (Link[] memory links);
        function getLinkCount(address user) external view returns (uint256 count);
        function addLink(string memory title, string memory url) external;
        function removeLink(uint256 index) external;
        function updateLink(uint256 index, string memory title, string memory url) external;
        function clearLinks() external;
        function hasLinks(address user) external view returns (bool exists);
        function getLink(address user, uint256 index) external view returns (Link memory link);
        function getContractInfo() external pure returns (uint256 maxLinks, uint256 maxTitleLength, uint256 maxUrlLength);

        error EmptyTitle();
        error EmptyURL();
        error InvalidURL();
        error TooManyLinks();
        error NoLinksToDelete();
        error UnauthorizedAccess();
    }
}

impl From<Link> for lt_api_types::Link {
    fn from(link: Link) -> Self {
        Self {
            title: link.title,
            url: link.url,
        }
    }
}

impl From<&lt_api_types::Link> for Link {
    fn from(link: &lt_api_types::Link) -> Self {
        Self {
            title: link.title.clone(),
            url: link.url.clone(),
        }
    }
}
