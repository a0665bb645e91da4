mod cached_repository_tests;
